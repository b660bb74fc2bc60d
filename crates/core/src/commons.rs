//! Model builder, updater and deleter.
//!
//! Every resource endpoint funnels its mutations through [`Commons`]: raw
//! parameters are validated by the [`ValidatorTable`], foreign keys are
//! checked against the store through the [`ForeignKeyTable`], and only then
//! is an entity assembled or changed. Persisting created and updated
//! entities is left to the caller; deletes are carried out here because they
//! must cascade into association tables.

use std::collections::BTreeSet;

use crate::entity::Entity;
use crate::error::CoreError;
use crate::foreign_key::ForeignKeyTable;
use crate::store::{EntityStore, Store};
use crate::types::DbId;
use crate::validation::{ParamBundle, ParamDescriptor, ParamValue, ValidatedParams, ValidatorTable};

/// The lookup tables the CRUD functions run against.
#[derive(Debug, Clone)]
pub struct Commons {
    validators: ValidatorTable,
    foreign_keys: ForeignKeyTable,
}

impl Commons {
    pub fn new(validators: ValidatorTable, foreign_keys: ForeignKeyTable) -> Self {
        Self {
            validators,
            foreign_keys,
        }
    }

    /// Built-in validators and every primary-key column as a foreign key.
    pub fn standard() -> Self {
        Self::new(ValidatorTable::standard(), ForeignKeyTable::standard())
    }

    pub fn validators(&self) -> &ValidatorTable {
        &self.validators
    }

    pub fn foreign_keys(&self) -> &ForeignKeyTable {
        &self.foreign_keys
    }

    /// Validate one supplied value, then confirm any row it references exists.
    async fn check_param<S>(
        &self,
        store: &S,
        name: &str,
        desc: &ParamDescriptor,
        raw: &str,
    ) -> Result<ParamValue, CoreError>
    where
        S: Store + ?Sized,
    {
        let value = self
            .validators
            .validate(name, desc.param_type, raw, &desc.bounds)?;
        self.foreign_keys.resolve(store, name, &value).await?;
        Ok(value)
    }

    /// Build a new, unsaved `E` from a parameter bundle.
    ///
    /// A parameter without a value is skipped if it is in `optional` and
    /// fails with [`CoreError::MissingParameter`] otherwise. The only storage
    /// access is the foreign-key existence checks.
    pub async fn create_model<E, S>(
        &self,
        store: &S,
        params: &ParamBundle,
        optional: &BTreeSet<&str>,
    ) -> Result<E::New, CoreError>
    where
        E: Entity,
        S: Store + ?Sized,
    {
        let mut values = ValidatedParams::new();
        for (name, desc) in params.iter() {
            let Some(raw) = desc.value.as_deref() else {
                if optional.contains(name) {
                    continue;
                }
                return Err(CoreError::MissingParameter(name.to_string()));
            };
            let value = self.check_param(store, name, desc, raw).await?;
            values.insert(name, value);
        }

        tracing::debug!(entity = E::KIND.name(), fields = values.len(), "Built new model");
        E::build(values)
    }

    /// Load `E` by id and apply every supplied parameter to it.
    ///
    /// Parameters without a value are left unchanged; a bundle with no
    /// values at all fails with [`CoreError::NoOpUpdate`] before anything is
    /// touched. The mutated entity is returned unsaved.
    pub async fn update_model<E, S>(&self, store: &S, id: DbId, params: &ParamBundle) -> Result<E, CoreError>
    where
        E: Entity,
        S: EntityStore<E> + ?Sized,
    {
        let mut entity = store.find_by_id(id).await?.ok_or(CoreError::NotFound {
            entity: E::KIND.name(),
            id,
        })?;
        if params.all_null() {
            return Err(CoreError::NoOpUpdate);
        }

        for (name, desc) in params.iter() {
            let Some(raw) = desc.value.as_deref() else {
                continue;
            };
            let value = self.check_param(store, name, desc, raw).await?;
            entity.assign(name, value)?;
        }

        tracing::debug!(entity = E::KIND.name(), id, "Applied model update");
        Ok(entity)
    }

    /// Delete `E` by id, removing its association rows first.
    ///
    /// Returns the number of association rows removed alongside the entity.
    pub async fn delete_model<E, S>(&self, store: &S, id: DbId) -> Result<u64, CoreError>
    where
        E: Entity,
        S: Store + ?Sized,
    {
        if !store.exists(E::KIND, id).await? {
            return Err(CoreError::NotFound {
                entity: E::KIND.name(),
                id,
            });
        }

        let unlinked = store
            .delete_cascade(E::KIND, id, E::KIND.associations())
            .await?;
        tracing::info!(entity = E::KIND.name(), id, unlinked, "Deleted model");
        Ok(unlinked)
    }
}

impl Default for Commons {
    fn default() -> Self {
        Self::standard()
    }
}
