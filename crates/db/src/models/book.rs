//! Book entity model.
//!
//! Books are only ever created through an author so that the
//! `authors_books` row exists from the start.

use risuspubl_core::entity::{unknown_field, Entity, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::types::{Date, DbId};
use risuspubl_core::validation::{Bounds, ParamSpec, ParamType, ParamValue, ValidatedParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `books` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Book {
    pub book_id: DbId,
    pub editor_id: DbId,
    pub series_id: Option<DbId>,
    pub title: String,
    pub publication_date: Option<Date>,
    pub edition_number: i64,
    pub pages: Option<i64>,
    pub is_in_print: bool,
}

/// A book not yet inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub editor_id: DbId,
    pub series_id: Option<DbId>,
    pub title: String,
    pub publication_date: Option<Date>,
    /// Defaults to 1 if omitted.
    pub edition_number: i64,
    pub pages: Option<i64>,
    /// Defaults to `false` if omitted.
    pub is_in_print: bool,
}

impl Entity for Book {
    type New = NewBook;

    const KIND: EntityKind = EntityKind::Book;

    const PARAMS: &'static [ParamSpec] = &[
        ParamSpec::required("editor_id", ParamType::Int, Bounds::Default),
        ParamSpec::optional("series_id", ParamType::Int, Bounds::Default),
        ParamSpec::required("title", ParamType::Str, Bounds::Default),
        ParamSpec::optional("publication_date", ParamType::Date, Bounds::Default),
        ParamSpec::optional("edition_number", ParamType::Int, Bounds::int(1, 10)),
        ParamSpec::optional("pages", ParamType::Int, Bounds::int(1, 10_000)),
        ParamSpec::optional("is_in_print", ParamType::Bool, Bounds::Default),
    ];

    fn id(&self) -> DbId {
        self.book_id
    }

    fn build(mut values: ValidatedParams) -> Result<NewBook, CoreError> {
        Ok(NewBook {
            editor_id: values.required("editor_id")?,
            series_id: values.optional("series_id")?,
            title: values.required("title")?,
            publication_date: values.optional("publication_date")?,
            edition_number: values.optional("edition_number")?.unwrap_or(1),
            pages: values.optional("pages")?,
            is_in_print: values.optional("is_in_print")?.unwrap_or(false),
        })
    }

    fn assign(&mut self, field: &str, value: ParamValue) -> Result<(), CoreError> {
        match field {
            "editor_id" => self.editor_id = value.into_field(field)?,
            "series_id" => self.series_id = Some(value.into_field(field)?),
            "title" => self.title = value.into_field(field)?,
            "publication_date" => self.publication_date = Some(value.into_field(field)?),
            "edition_number" => self.edition_number = value.into_field(field)?,
            "pages" => self.pages = Some(value.into_field(field)?),
            "is_in_print" => self.is_in_print = value.into_field(field)?,
            _ => return Err(unknown_field(Self::KIND, field)),
        }
        Ok(())
    }
}
