use gurudev_db::table::Enquiry;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;
use tokio::sync::mpsc::UnboundedSender;

use crate::{EnquiryInput, Status, SubmitEnquiry};

/// Published after an enquiry is stored, for forwarding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnquirySubmitted {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub state: String,
    pub pincode: String,
    pub message: String,
    pub created_at: u64,
}

/// Stores enquiries in SQLite and hands them to the forwarding subscriber.
#[derive(Clone)]
pub struct Command {
    pool: SqlitePool,
    subscriber: Option<UnboundedSender<EnquirySubmitted>>,
}

impl Command {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            subscriber: None,
        }
    }

    pub fn with_subscriber(mut self, subscriber: UnboundedSender<EnquirySubmitted>) -> Self {
        self.subscriber = Some(subscriber);
        self
    }

    #[tracing::instrument(skip_all, fields(enquiry.id))]
    pub async fn create(&self, input: &EnquiryInput) -> gurudev_shared::Result<String> {
        let id = ulid::Ulid::new().to_string();
        let created_at = gurudev_shared::now_timestamp();
        tracing::Span::current().record("enquiry.id", id.as_str());

        let statement = sea_query::Query::insert()
            .into_table(Enquiry::Table)
            .columns([
                Enquiry::Id,
                Enquiry::Name,
                Enquiry::Email,
                Enquiry::Phone,
                Enquiry::State,
                Enquiry::Pincode,
                Enquiry::Message,
                Enquiry::Status,
                Enquiry::CreatedAt,
            ])
            .values([
                id.to_owned().into(),
                input.name().into(),
                input.email().into(),
                input.phone().into(),
                input.state().to_string().into(),
                input.pincode().into(),
                input.message().into(),
                Status::Received.to_string().into(),
                (created_at as i64).into(),
            ])?
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        tracing::info!("Enquiry stored");

        if let Some(subscriber) = &self.subscriber {
            let event = EnquirySubmitted {
                id: id.to_owned(),
                name: input.name().to_owned(),
                email: input.email().to_owned(),
                phone: input.phone().to_owned(),
                state: input.state().to_string(),
                pincode: input.pincode().to_owned(),
                message: input.message().to_owned(),
                created_at,
            };

            if subscriber.send(event).is_err() {
                tracing::warn!("Enquiry subscriber is closed, enquiry will not be forwarded");
            }
        }

        Ok(id)
    }

    pub async fn mark_forwarded(&self, id: impl Into<String>) -> gurudev_shared::Result<()> {
        let id = id.into();

        let statement = sea_query::Query::update()
            .table(Enquiry::Table)
            .values([
                (Enquiry::Status, Status::Forwarded.to_string().into()),
                (
                    Enquiry::ForwardedAt,
                    (gurudev_shared::now_timestamp() as i64).into(),
                ),
            ])
            .and_where(Expr::col(Enquiry::Id).eq(id.to_owned()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            gurudev_shared::bail!("enquiry {id} not found");
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl SubmitEnquiry for Command {
    async fn submit(&self, input: &EnquiryInput) -> gurudev_shared::Result<String> {
        self.create(input).await
    }
}
