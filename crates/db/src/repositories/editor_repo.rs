//! Repository for the `editors` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::PgEntity;
use crate::models::editor::{Editor, NewEditor};

const COLUMNS: &str = "editor_id, first_name, last_name, salary";

pub struct EditorRepo;

impl EditorRepo {
    pub async fn create(conn: &mut PgConnection, input: &NewEditor) -> Result<Editor, sqlx::Error> {
        let query = format!(
            "INSERT INTO editors (first_name, last_name, salary)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Editor>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.salary)
            .fetch_one(conn)
            .await
    }

    pub async fn update(conn: &mut PgConnection, editor: &Editor) -> Result<Option<Editor>, sqlx::Error> {
        let query = format!(
            "UPDATE editors SET first_name = $2, last_name = $3, salary = $4
             WHERE editor_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Editor>(&query)
            .bind(editor.editor_id)
            .bind(&editor.first_name)
            .bind(&editor.last_name)
            .bind(editor.salary)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl PgEntity for Editor {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert(conn: &mut PgConnection, new: &NewEditor) -> Result<Self, sqlx::Error> {
        EditorRepo::create(conn, new).await
    }

    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error> {
        EditorRepo::update(conn, entity).await
    }
}
