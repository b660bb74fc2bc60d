//! Repository for the `books` table.

use async_trait::async_trait;
use sqlx::PgConnection;

use super::PgEntity;
use crate::models::book::{Book, NewBook};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "book_id, editor_id, series_id, title, publication_date, \
                       edition_number, pages, is_in_print";

/// Provides insert and update for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book, returning the created row.
    ///
    /// Callers go through an author so the `authors_books` row is written in
    /// the same transaction.
    pub async fn create(conn: &mut PgConnection, input: &NewBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (editor_id, series_id, title, publication_date,
                                edition_number, pages, is_in_print)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(input.editor_id)
            .bind(input.series_id)
            .bind(&input.title)
            .bind(input.publication_date)
            .bind(input.edition_number)
            .bind(input.pages)
            .bind(input.is_in_print)
            .fetch_one(conn)
            .await
    }

    /// Overwrite every column of an existing book.
    pub async fn update(conn: &mut PgConnection, book: &Book) -> Result<Option<Book>, sqlx::Error> {
        let query = format!(
            "UPDATE books SET
                editor_id = $2,
                series_id = $3,
                title = $4,
                publication_date = $5,
                edition_number = $6,
                pages = $7,
                is_in_print = $8
             WHERE book_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(book.book_id)
            .bind(book.editor_id)
            .bind(book.series_id)
            .bind(&book.title)
            .bind(book.publication_date)
            .bind(book.edition_number)
            .bind(book.pages)
            .bind(book.is_in_print)
            .fetch_optional(conn)
            .await
    }
}

#[async_trait]
impl PgEntity for Book {
    const COLUMNS: &'static str = COLUMNS;

    async fn insert(conn: &mut PgConnection, new: &NewBook) -> Result<Self, sqlx::Error> {
        BookRepo::create(conn, new).await
    }

    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error> {
        BookRepo::update(conn, entity).await
    }
}
