//! Repository for the `sales_records` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::PgEntity;
use crate::models::sales_record::{NewSalesRecord, SalesRecord};

const COLUMNS: &str = "sales_record_id, book_id, year, month, copies_sold, gross_profit, net_profit";

pub struct SalesRecordRepo;

impl SalesRecordRepo {
    pub async fn create(conn: &mut PgConnection, input: &NewSalesRecord) -> Result<SalesRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO sales_records (book_id, year, month, copies_sold, gross_profit, net_profit)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SalesRecord>(&query)
            .bind(input.book_id)
            .bind(input.year)
            .bind(input.month)
            .bind(input.copies_sold)
            .bind(input.gross_profit)
            .bind(input.net_profit)
            .fetch_one(conn)
            .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        record: &SalesRecord,
    ) -> Result<Option<SalesRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE sales_records SET
                book_id = $2,
                year = $3,
                month = $4,
                copies_sold = $5,
                gross_profit = $6,
                net_profit = $7
             WHERE sales_record_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SalesRecord>(&query)
            .bind(record.sales_record_id)
            .bind(record.book_id)
            .bind(record.year)
            .bind(record.month)
            .bind(record.copies_sold)
            .bind(record.gross_profit)
            .bind(record.net_profit)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl PgEntity for SalesRecord {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert(conn: &mut PgConnection, new: &NewSalesRecord) -> Result<Self, sqlx::Error> {
        SalesRecordRepo::create(conn, new).await
    }

    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error> {
        SalesRecordRepo::update(conn, entity).await
    }
}
