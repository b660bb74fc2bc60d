//! Storage collaborator traits.
//!
//! The CRUD functions only need existence checks, row loading and a
//! cascading delete. Handlers additionally insert, save and list. The
//! PostgreSQL implementation lives in `risuspubl-db`; [`memory::MemoryStore`]
//! keeps everything in process.

pub mod memory;

use async_trait::async_trait;

use crate::entity::{Association, Entity, EntityKind};
use crate::error::CoreError;
use crate::types::DbId;

/// Storage operations that do not depend on the row type.
#[async_trait]
pub trait Store: Send + Sync {
    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), CoreError>;

    /// Whether a row with primary key `id` exists in `kind`'s table.
    async fn exists(&self, kind: EntityKind, id: DbId) -> Result<bool, CoreError>;

    /// Delete every row of `associations` referencing `id`, then the row
    /// itself, as one transaction. Returns the number of association rows
    /// removed.
    ///
    /// Fails with [`CoreError::NotFound`] if the row is gone and with
    /// [`CoreError::Integrity`] if another row still references it.
    async fn delete_cascade(
        &self,
        kind: EntityKind,
        id: DbId,
        associations: &[Association],
    ) -> Result<u64, CoreError>;
}

/// Storage operations on one row type.
#[async_trait]
pub trait EntityStore<E: Entity>: Store {
    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, CoreError>;

    /// All rows, ordered by primary key.
    async fn list(&self) -> Result<Vec<E>, CoreError>;

    async fn insert(&self, new: &E::New) -> Result<E, CoreError>;

    /// Persist every field of an already-stored row.
    async fn save(&self, entity: &E) -> Result<E, CoreError>;

    /// Insert a row and link it to every author in `author_ids` through
    /// `association`, as one transaction.
    async fn insert_linked(
        &self,
        new: &E::New,
        association: Association,
        author_ids: &[DbId],
    ) -> Result<E, CoreError>;

    /// Rows linked to every author in `author_ids` through `association`,
    /// ordered by primary key.
    async fn list_linked(
        &self,
        association: Association,
        author_ids: &[DbId],
    ) -> Result<Vec<E>, CoreError>;
}

/// Reject a linked insert that could only fail halfway: a row type the
/// association does not hold, no authors, or the same author twice.
pub fn check_link_request(
    kind: EntityKind,
    association: Association,
    author_ids: &[DbId],
) -> Result<(), CoreError> {
    if association.member() != kind {
        return Err(CoreError::Internal(format!(
            "{} rows cannot be linked through `{}`",
            kind.name(),
            association.table()
        )));
    }
    if author_ids.is_empty() {
        return Err(CoreError::Internal(format!(
            "no authors given for a `{}` link",
            association.table()
        )));
    }
    for (i, id) in author_ids.iter().enumerate() {
        if author_ids[..i].contains(id) {
            return Err(CoreError::Validation(format!(
                "author {id} is listed more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn link_request_rejects_repeated_author() {
        assert_matches!(
            check_link_request(EntityKind::Book, Association::AuthorsBooks, &[4, 4]),
            Err(CoreError::Validation(msg)) if msg == "author 4 is listed more than once"
        );
        assert!(check_link_request(EntityKind::Book, Association::AuthorsBooks, &[4, 5]).is_ok());
    }

    #[test]
    fn link_request_rejects_wrong_member_and_empty_authors() {
        assert_matches!(
            check_link_request(EntityKind::Book, Association::AuthorsManuscripts, &[1]),
            Err(CoreError::Internal(_))
        );
        assert_matches!(
            check_link_request(EntityKind::Manuscript, Association::AuthorsManuscripts, &[]),
            Err(CoreError::Internal(_))
        );
    }
}
