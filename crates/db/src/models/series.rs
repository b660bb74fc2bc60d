//! Series entity model.

use risuspubl_core::entity::{unknown_field, Entity, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::types::DbId;
use risuspubl_core::validation::{Bounds, ParamSpec, ParamType, ParamValue, ValidatedParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `series` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Series {
    pub series_id: DbId,
    pub title: String,
    pub volumes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSeries {
    pub title: String,
    pub volumes: i64,
}

impl Entity for Series {
    type New = NewSeries;

    const KIND: EntityKind = EntityKind::Series;

    const PARAMS: &'static [ParamSpec] = &[
        ParamSpec::required("title", ParamType::Str, Bounds::Default),
        ParamSpec::required("volumes", ParamType::Int, Bounds::int(2, 5)),
    ];

    fn id(&self) -> DbId {
        self.series_id
    }

    fn build(mut values: ValidatedParams) -> Result<NewSeries, CoreError> {
        Ok(NewSeries {
            title: values.required("title")?,
            volumes: values.required("volumes")?,
        })
    }

    fn assign(&mut self, field: &str, value: ParamValue) -> Result<(), CoreError> {
        match field {
            "title" => self.title = value.into_field(field)?,
            "volumes" => self.volumes = value.into_field(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}
