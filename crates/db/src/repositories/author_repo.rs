//! Repository for the `authors` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::PgEntity;
use crate::models::author::{Author, NewAuthor};

const COLUMNS: &str = "author_id, first_name, last_name";

/// Provides insert and update for authors.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Insert a new author, returning the created row.
    pub async fn create(conn: &mut PgConnection, input: &NewAuthor) -> Result<Author, sqlx::Error> {
        let query = format!(
            "INSERT INTO authors (first_name, last_name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .fetch_one(conn)
            .await
    }

    pub async fn update(conn: &mut PgConnection, author: &Author) -> Result<Option<Author>, sqlx::Error> {
        let query = format!(
            "UPDATE authors SET first_name = $2, last_name = $3
             WHERE author_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(author.author_id)
            .bind(&author.first_name)
            .bind(&author.last_name)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl PgEntity for Author {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert(conn: &mut PgConnection, new: &NewAuthor) -> Result<Self, sqlx::Error> {
        AuthorRepo::create(conn, new).await
    }

    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error> {
        AuthorRepo::update(conn, entity).await
    }
}
