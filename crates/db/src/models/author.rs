//! Author entity model.

use risuspubl_core::entity::{unknown_field, Entity, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::types::DbId;
use risuspubl_core::validation::{Bounds, ParamSpec, ParamType, ParamValue, ValidatedParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `authors` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Author {
    pub author_id: DbId,
    pub first_name: String,
    pub last_name: String,
}

/// An author not yet inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
}

impl Entity for Author {
    type New = NewAuthor;

    const KIND: EntityKind = EntityKind::Author;

    const PARAMS: &'static [ParamSpec] = &[
        ParamSpec::required("first_name", ParamType::Str, Bounds::Default),
        ParamSpec::required("last_name", ParamType::Str, Bounds::Default),
    ];

    fn id(&self) -> DbId {
        self.author_id
    }

    fn build(mut values: ValidatedParams) -> Result<NewAuthor, CoreError> {
        Ok(NewAuthor {
            first_name: values.required("first_name")?,
            last_name: values.required("last_name")?,
        })
    }

    fn assign(&mut self, field: &str, value: ParamValue) -> Result<(), CoreError> {
        match field {
            "first_name" => self.first_name = value.into_field(field)?,
            "last_name" => self.last_name = value.into_field(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}
