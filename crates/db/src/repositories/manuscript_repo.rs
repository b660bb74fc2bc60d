//! Repository for the `manuscripts` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::PgEntity;
use crate::models::manuscript::{Manuscript, NewManuscript};

const COLUMNS: &str = "manuscript_id, editor_id, series_id, working_title, due_date, advance";

/// Provides insert and update for manuscripts.
pub struct ManuscriptRepo;

impl ManuscriptRepo {
    pub async fn create(conn: &mut PgConnection, input: &NewManuscript) -> Result<Manuscript, sqlx::Error> {
        let query = format!(
            "INSERT INTO manuscripts (editor_id, series_id, working_title, due_date, advance)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manuscript>(&query)
            .bind(input.editor_id)
            .bind(input.series_id)
            .bind(&input.working_title)
            .bind(input.due_date)
            .bind(input.advance)
            .fetch_one(conn)
            .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        manuscript: &Manuscript,
    ) -> Result<Option<Manuscript>, sqlx::Error> {
        let query = format!(
            "UPDATE manuscripts SET
                editor_id = $2,
                series_id = $3,
                working_title = $4,
                due_date = $5,
                advance = $6
             WHERE manuscript_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manuscript>(&query)
            .bind(manuscript.manuscript_id)
            .bind(manuscript.editor_id)
            .bind(manuscript.series_id)
            .bind(&manuscript.working_title)
            .bind(manuscript.due_date)
            .bind(manuscript.advance)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl PgEntity for Manuscript {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert(conn: &mut PgConnection, new: &NewManuscript) -> Result<Self, sqlx::Error> {
        ManuscriptRepo::create(conn, new).await
    }

    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error> {
        ManuscriptRepo::update(conn, entity).await
    }
}
