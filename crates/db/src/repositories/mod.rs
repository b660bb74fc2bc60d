//! Repositories for the publishing schema.
//!
//! Entity-specific SQL (insert and update column lists) lives in one
//! `*Repo` per table; lookups, listing, association rows and cascading
//! deletes are table-agnostic and live in [`RowRepo`].

mod author_repo;
mod book_repo;
mod client_repo;
mod editor_repo;
mod manuscript_repo;
mod rows;
mod sales_record_repo;
mod salesperson_repo;
mod series_repo;

use async_trait::async_trait;
use risuspubl_core::entity::Entity;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

pub use author_repo::AuthorRepo;
pub use book_repo::BookRepo;
pub use client_repo::ClientRepo;
pub use editor_repo::EditorRepo;
pub use manuscript_repo::ManuscriptRepo;
pub use rows::RowRepo;
pub use sales_record_repo::SalesRecordRepo;
pub use salesperson_repo::SalespersonRepo;
pub use series_repo::SeriesRepo;

/// An entity that can be read from and written to its PostgreSQL table.
#[async_trait]
pub trait PgEntity: Entity + for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Column list shared across queries, primary key first.
    const COLUMNS: &'static str;

    async fn insert(conn: &mut PgConnection, new: &Self::New) -> Result<Self, sqlx::Error>;

    /// Write every column of `entity`. Returns `None` if the row is gone.
    async fn update(conn: &mut PgConnection, entity: &Self) -> Result<Option<Self>, sqlx::Error>;
}
