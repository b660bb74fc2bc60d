//! Foreign-key resolution: parameter name to referenced entity kind.

use std::collections::HashMap;

use crate::entity::EntityKind;
use crate::error::CoreError;
use crate::store::Store;
use crate::validation::ParamValue;

/// Immutable mapping from foreign-key parameter name to the entity it names.
#[derive(Debug, Clone, Default)]
pub struct ForeignKeyTable {
    keys: HashMap<&'static str, EntityKind>,
}

impl ForeignKeyTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every entity's primary-key column, as referenced from other tables.
    pub fn standard() -> Self {
        EntityKind::ALL
            .into_iter()
            .fold(Self::empty(), |table, kind| table.with(kind.id_column(), kind))
    }

    pub fn with(mut self, param: &'static str, kind: EntityKind) -> Self {
        self.keys.insert(param, kind);
        self
    }

    pub fn target(&self, param: &str) -> Option<EntityKind> {
        self.keys.get(param).copied()
    }

    /// Confirm the row a foreign-key parameter points at exists.
    ///
    /// Parameters not registered in the table pass through untouched.
    pub async fn resolve<S>(&self, store: &S, param: &str, value: &ParamValue) -> Result<(), CoreError>
    where
        S: Store + ?Sized,
    {
        let Some(kind) = self.target(param) else {
            return Ok(());
        };
        let ParamValue::Int(id) = *value else {
            return Err(CoreError::Internal(format!(
                "foreign key {param} must be declared as an integer parameter"
            )));
        };

        if store.exists(kind, id).await? {
            Ok(())
        } else {
            tracing::debug!(param, id, table = kind.table(), "Dangling foreign key");
            Err(CoreError::Referential {
                param: param.to_string(),
                value: id,
                table: kind.table(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn standard_table_registers_every_id_column() {
        let table = ForeignKeyTable::standard();
        assert_eq!(table.target("editor_id"), Some(EntityKind::Editor));
        assert_eq!(table.target("sales_record_id"), Some(EntityKind::SalesRecord));
        assert_eq!(table.target("title"), None);
    }

    #[tokio::test]
    async fn existing_reference_resolves() {
        let store = MemoryStore::new();
        store
            .seed_row(EntityKind::Editor, 7, json!({"first_name": "Ann", "last_name": "Lee", "salary": 1}))
            .unwrap();

        let table = ForeignKeyTable::standard();
        table
            .resolve(&store, "editor_id", &ParamValue::Int(7))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn dangling_reference_is_referential_error() {
        let store = MemoryStore::new();
        let table = ForeignKeyTable::standard();

        let err = table
            .resolve(&store, "series_id", &ParamValue::Int(3))
            .await
            .unwrap_err();
        assert_matches!(
            &err,
            CoreError::Referential { param, value: 3, table: "series" } if param == "series_id"
        );
        assert_eq!(
            err.to_string(),
            "supplied 'series_id' value '3' does not correspond to any row in the `series` table"
        );
    }

    #[tokio::test]
    async fn unregistered_names_are_not_checked() {
        let store = MemoryStore::new();
        let table = ForeignKeyTable::empty();
        table
            .resolve(&store, "editor_id", &ParamValue::Int(99))
            .await
            .unwrap();
    }
}
