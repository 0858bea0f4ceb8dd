use gurudev_db::table::Enquiry;
use sea_query::{Expr, ExprTrait, Func, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

use crate::Status;

#[derive(Debug, Default, FromRow)]
pub struct EnquiryRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub pincode: String,
    pub message: String,
    pub status: sqlx::types::Text<Status>,
    pub created_at: i64,
    pub forwarded_at: Option<i64>,
}

impl EnquiryRow {
    pub fn is_forwarded(&self) -> bool {
        self.status.0 == Status::Forwarded
    }

    pub fn created_at(&self) -> String {
        gurudev_shared::format_timestamp(Ord::max(self.created_at, 0) as u64)
    }
}

const COLUMNS: [Enquiry; 10] = [
    Enquiry::Id,
    Enquiry::Name,
    Enquiry::Email,
    Enquiry::Phone,
    Enquiry::State,
    Enquiry::Pincode,
    Enquiry::Message,
    Enquiry::Status,
    Enquiry::CreatedAt,
    Enquiry::ForwardedAt,
];

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn find(&self, id: impl Into<String>) -> anyhow::Result<Option<EnquiryRow>> {
        let statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(Enquiry::Table)
            .and_where(Expr::col(Enquiry::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, EnquiryRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    /// Newest first.
    pub async fn recent(&self, limit: u64) -> anyhow::Result<Vec<EnquiryRow>> {
        let statement = sea_query::Query::select()
            .columns(COLUMNS)
            .from(Enquiry::Table)
            .order_by(Enquiry::CreatedAt, Order::Desc)
            .order_by(Enquiry::Id, Order::Desc)
            .limit(limit)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, EnquiryRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn count_by_status(&self, status: Status) -> anyhow::Result<u32> {
        let statement = sea_query::Query::select()
            .expr(Func::count(Expr::col(Enquiry::Id)))
            .from(Enquiry::Table)
            .and_where(Expr::col(Enquiry::Status).eq(status.to_string()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        Ok(count as u32)
    }
}
