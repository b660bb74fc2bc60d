//! Repository for the `salespeople` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::PgEntity;
use crate::models::salesperson::{NewSalesperson, Salesperson};

const COLUMNS: &str = "salesperson_id, first_name, last_name, salary";

pub struct SalespersonRepo;

impl SalespersonRepo {
    pub async fn create(conn: &mut PgConnection, input: &NewSalesperson) -> Result<Salesperson, sqlx::Error> {
        let query = format!(
            "INSERT INTO salespeople (first_name, last_name, salary)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Salesperson>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.salary)
            .fetch_one(conn)
            .await
    }

    pub async fn update(conn: &mut PgConnection, salesperson: &Salesperson) -> Result<Option<Salesperson>, sqlx::Error> {
        let query = format!(
            "UPDATE salespeople SET first_name = $2, last_name = $3, salary = $4
             WHERE salesperson_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Salesperson>(&query)
            .bind(salesperson.salesperson_id)
            .bind(&salesperson.first_name)
            .bind(&salesperson.last_name)
            .bind(salesperson.salary)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl PgEntity for Salesperson {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert(conn: &mut PgConnection, new: &NewSalesperson) -> Result<Self, sqlx::Error> {
        SalespersonRepo::create(conn, new).await
    }

    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error> {
        SalespersonRepo::update(conn, entity).await
    }
}
