//! Manuscript entity model.

use risuspubl_core::entity::{unknown_field, Entity, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::types::{Date, DbId};
use risuspubl_core::validation::{Bounds, ParamSpec, ParamType, ParamValue, ValidatedParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Due dates are allowed to lie in the future.
const DUE_DATE_BOUNDS: Bounds = Bounds::date("1990-01-01", "2099-12-31");

/// A row from the `manuscripts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Manuscript {
    pub manuscript_id: DbId,
    pub editor_id: DbId,
    pub series_id: Option<DbId>,
    pub working_title: String,
    pub due_date: Date,
    pub advance: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewManuscript {
    pub editor_id: DbId,
    pub series_id: Option<DbId>,
    pub working_title: String,
    pub due_date: Date,
    pub advance: i64,
}

impl Entity for Manuscript {
    type New = NewManuscript;

    const KIND: EntityKind = EntityKind::Manuscript;

    const PARAMS: &'static [ParamSpec] = &[
        ParamSpec::required("editor_id", ParamType::Int, Bounds::Default),
        ParamSpec::optional("series_id", ParamType::Int, Bounds::Default),
        ParamSpec::required("working_title", ParamType::Str, Bounds::Default),
        ParamSpec::required("due_date", ParamType::Date, DUE_DATE_BOUNDS),
        ParamSpec::required("advance", ParamType::Int, Bounds::int(5_000, 100_000)),
    ];

    fn id(&self) -> DbId {
        self.manuscript_id
    }

    fn build(mut values: ValidatedParams) -> Result<NewManuscript, CoreError> {
        Ok(NewManuscript {
            editor_id: values.required("editor_id")?,
            series_id: values.optional("series_id")?,
            working_title: values.required("working_title")?,
            due_date: values.required("due_date")?,
            advance: values.required("advance")?,
        })
    }

    fn assign(&mut self, field: &str, value: ParamValue) -> Result<(), CoreError> {
        match field {
            "editor_id" => self.editor_id = value.into_field(field)?,
            "series_id" => self.series_id = Some(value.into_field(field)?),
            "working_title" => self.working_title = value.into_field(field)?,
            "due_date" => self.due_date = value.into_field(field)?,
            "advance" => self.advance = value.into_field(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}
