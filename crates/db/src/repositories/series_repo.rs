//! Repository for the `series` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::PgEntity;
use crate::models::series::{NewSeries, Series};

const COLUMNS: &str = "series_id, title, volumes";

pub struct SeriesRepo;

impl SeriesRepo {
    pub async fn create(conn: &mut PgConnection, input: &NewSeries) -> Result<Series, sqlx::Error> {
        let query = format!(
            "INSERT INTO series (title, volumes)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(&input.title)
            .bind(input.volumes)
            .fetch_one(conn)
            .await
    }

    pub async fn update(conn: &mut PgConnection, series: &Series) -> Result<Option<Series>, sqlx::Error> {
        let query = format!(
            "UPDATE series SET title = $2, volumes = $3
             WHERE series_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(series.series_id)
            .bind(&series.title)
            .bind(series.volumes)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl PgEntity for Series {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert(conn: &mut PgConnection, new: &NewSeries) -> Result<Self, sqlx::Error> {
        SeriesRepo::create(conn, new).await
    }

    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error> {
        SeriesRepo::update(conn, entity).await
    }
}
