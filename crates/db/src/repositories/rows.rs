//! Table-agnostic row operations driven by [`EntityKind`] descriptors.

use risuspubl_core::entity::{Association, EntityKind};
use risuspubl_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use super::PgEntity;

/// Lookups, listings, association rows and cascading deletes.
pub struct RowRepo;

impl RowRepo {
    pub async fn find_by_id<E: PgEntity>(pool: &PgPool, id: DbId) -> Result<Option<E>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} WHERE {} = $1",
            E::COLUMNS,
            E::KIND.table(),
            E::KIND.id_column()
        );
        sqlx::query_as::<_, E>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All rows, ordered by primary key.
    pub async fn list<E: PgEntity>(pool: &PgPool) -> Result<Vec<E>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY {}",
            E::COLUMNS,
            E::KIND.table(),
            E::KIND.id_column()
        );
        sqlx::query_as::<_, E>(&query).fetch_all(pool).await
    }

    /// Rows linked to every author in `author_ids` through `association`.
    pub async fn list_linked<E: PgEntity>(
        pool: &PgPool,
        association: Association,
        author_ids: &[DbId],
    ) -> Result<Vec<E>, sqlx::Error> {
        let id_column = E::KIND.id_column();
        let query = format!(
            "SELECT {columns} FROM {table}
             WHERE {id_column} IN (
                SELECT {id_column} FROM {assoc}
                WHERE author_id = ANY($1)
                GROUP BY {id_column}
                HAVING COUNT(DISTINCT author_id) = $2
             )
             ORDER BY {id_column}",
            columns = E::COLUMNS,
            table = E::KIND.table(),
            assoc = association.table(),
        );
        sqlx::query_as::<_, E>(&query)
            .bind(author_ids)
            .bind(author_ids.len() as i64)
            .fetch_all(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, kind: EntityKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = $1)",
            kind.table(),
            kind.id_column()
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Pair an author with a member row.
    pub async fn link(
        conn: &mut PgConnection,
        association: Association,
        author_id: DbId,
        member_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (author_id, {}) VALUES ($1, $2)",
            association.table(),
            association.member().id_column()
        );
        sqlx::query(&query)
            .bind(author_id)
            .bind(member_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Delete the association rows naming `id`, then the row itself, in one
    /// transaction.
    ///
    /// Returns `None` if the row does not exist (the transaction is rolled
    /// back), otherwise the number of association rows removed.
    pub async fn delete_cascade(
        pool: &PgPool,
        kind: EntityKind,
        id: DbId,
        associations: &[Association],
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let mut unlinked = 0;
        for association in associations {
            let Some(column) = association.column_for(kind) else {
                continue;
            };
            let query = format!("DELETE FROM {} WHERE {column} = $1", association.table());
            unlinked += sqlx::query(&query)
                .bind(id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        let query = format!("DELETE FROM {} WHERE {} = $1", kind.table(), kind.id_column());
        let deleted = sqlx::query(&query)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(unlinked))
    }
}
