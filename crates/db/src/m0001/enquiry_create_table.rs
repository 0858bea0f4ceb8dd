use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::Enquiry;

pub struct Operation;

fn up_statement() -> TableCreateStatement {
    Table::create()
        .table(Enquiry::Table)
        .col(
            ColumnDef::new(Enquiry::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Enquiry::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(Enquiry::Email)
                .string()
                .not_null()
                .string_len(320),
        )
        .col(
            ColumnDef::new(Enquiry::Phone)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(Enquiry::State)
                .string()
                .not_null()
                .string_len(50),
        )
        .col(
            ColumnDef::new(Enquiry::Pincode)
                .string()
                .not_null()
                .string_len(6),
        )
        .col(
            ColumnDef::new(Enquiry::Message)
                .string()
                .not_null()
                .string_len(2000),
        )
        .col(
            ColumnDef::new(Enquiry::Status)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(ColumnDef::new(Enquiry::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Enquiry::ForwardedAt).big_integer().null())
        .to_owned()
}

fn down_statement() -> TableDropStatement {
    Table::drop().table(Enquiry::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
