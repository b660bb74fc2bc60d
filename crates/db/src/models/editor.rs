//! Editor entity model.

use risuspubl_core::entity::{unknown_field, Entity, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::types::DbId;
use risuspubl_core::validation::{Bounds, ParamSpec, ParamType, ParamValue, ValidatedParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `editors` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Editor {
    pub editor_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub salary: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEditor {
    pub first_name: String,
    pub last_name: String,
    pub salary: i64,
}

impl Entity for Editor {
    type New = NewEditor;

    const KIND: EntityKind = EntityKind::Editor;

    const PARAMS: &'static [ParamSpec] = &[
        ParamSpec::required("first_name", ParamType::Str, Bounds::Default),
        ParamSpec::required("last_name", ParamType::Str, Bounds::Default),
        ParamSpec::required("salary", ParamType::Int, Bounds::int_at_least(0)),
    ];

    fn id(&self) -> DbId {
        self.editor_id
    }

    fn build(mut values: ValidatedParams) -> Result<NewEditor, CoreError> {
        Ok(NewEditor {
            first_name: values.required("first_name")?,
            last_name: values.required("last_name")?,
            salary: values.required("salary")?,
        })
    }

    fn assign(&mut self, field: &str, value: ParamValue) -> Result<(), CoreError> {
        match field {
            "first_name" => self.first_name = value.into_field(field)?,
            "last_name" => self.last_name = value.into_field(field)?,
            "salary" => self.salary = value.into_field(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}
