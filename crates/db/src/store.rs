//! [`Store`] implementation over a PostgreSQL pool.

use async_trait::async_trait;
use risuspubl_core::entity::{Association, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::store::{check_link_request, EntityStore, Store};
use risuspubl_core::types::DbId;

use crate::repositories::{PgEntity, RowRepo};
use crate::DbPool;

/// PostgreSQL error code for foreign-key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL error code for unique-constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Translate a driver error into the domain error the CRUD layer reports.
pub fn storage_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => CoreError::Integrity(db_err.message().to_string()),
            Some(UNIQUE_VIOLATION) => CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {}",
                db_err.constraint().unwrap_or("unknown")
            )),
            _ => {
                tracing::error!(error = %db_err, "Database error");
                CoreError::Internal(db_err.to_string())
            }
        },
        other => {
            tracing::error!(error = %other, "Database error");
            CoreError::Internal(other.to_string())
        }
    }
}

/// Storage backed by a connection pool. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(storage_error)
    }

    async fn exists(&self, kind: EntityKind, id: DbId) -> Result<bool, CoreError> {
        RowRepo::exists(&self.pool, kind, id)
            .await
            .map_err(storage_error)
    }

    async fn delete_cascade(
        &self,
        kind: EntityKind,
        id: DbId,
        associations: &[Association],
    ) -> Result<u64, CoreError> {
        RowRepo::delete_cascade(&self.pool, kind, id, associations)
            .await
            .map_err(storage_error)?
            .ok_or(CoreError::NotFound {
                entity: kind.name(),
                id,
            })
    }
}

#[async_trait]
impl<E: PgEntity> EntityStore<E> for PgStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, CoreError> {
        RowRepo::find_by_id(&self.pool, id)
            .await
            .map_err(storage_error)
    }

    async fn list(&self) -> Result<Vec<E>, CoreError> {
        RowRepo::list(&self.pool).await.map_err(storage_error)
    }

    async fn insert(&self, new: &E::New) -> Result<E, CoreError> {
        let mut conn = self.pool.acquire().await.map_err(storage_error)?;
        E::insert(&mut *conn, new).await.map_err(storage_error)
    }

    async fn save(&self, entity: &E) -> Result<E, CoreError> {
        let mut conn = self.pool.acquire().await.map_err(storage_error)?;
        E::update(&mut *conn, entity)
            .await
            .map_err(storage_error)?
            .ok_or(CoreError::NotFound {
                entity: E::KIND.name(),
                id: entity.id(),
            })
    }

    async fn insert_linked(
        &self,
        new: &E::New,
        association: Association,
        author_ids: &[DbId],
    ) -> Result<E, CoreError> {
        check_link_request(E::KIND, association, author_ids)?;

        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let row = E::insert(&mut *tx, new).await.map_err(storage_error)?;
        for &author_id in author_ids {
            RowRepo::link(&mut *tx, association, author_id, row.id())
                .await
                .map_err(storage_error)?;
        }
        tx.commit().await.map_err(storage_error)?;
        Ok(row)
    }

    async fn list_linked(
        &self,
        association: Association,
        author_ids: &[DbId],
    ) -> Result<Vec<E>, CoreError> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }
        RowRepo::list_linked(&self.pool, association, author_ids)
            .await
            .map_err(storage_error)
    }
}
