//! Entity descriptors.
//!
//! [`EntityKind`] names each table of the schema together with its primary
//! key column and the association tables it takes part in. The [`Entity`]
//! trait is the capability set the CRUD functions and handlers are generic
//! over.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{ParamSpec, ParamValue, ValidatedParams};

/// The primary tables of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Author,
    Book,
    Client,
    Editor,
    Manuscript,
    SalesRecord,
    Salesperson,
    Series,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Author,
        EntityKind::Book,
        EntityKind::Client,
        EntityKind::Editor,
        EntityKind::Manuscript,
        EntityKind::SalesRecord,
        EntityKind::Salesperson,
        EntityKind::Series,
    ];

    /// Human-readable name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Author => "Author",
            EntityKind::Book => "Book",
            EntityKind::Client => "Client",
            EntityKind::Editor => "Editor",
            EntityKind::Manuscript => "Manuscript",
            EntityKind::SalesRecord => "SalesRecord",
            EntityKind::Salesperson => "Salesperson",
            EntityKind::Series => "Series",
        }
    }

    pub const fn table(self) -> &'static str {
        match self {
            EntityKind::Author => "authors",
            EntityKind::Book => "books",
            EntityKind::Client => "clients",
            EntityKind::Editor => "editors",
            EntityKind::Manuscript => "manuscripts",
            EntityKind::SalesRecord => "sales_records",
            EntityKind::Salesperson => "salespeople",
            EntityKind::Series => "series",
        }
    }

    /// Primary key column; also the name other tables use to reference it.
    pub const fn id_column(self) -> &'static str {
        match self {
            EntityKind::Author => "author_id",
            EntityKind::Book => "book_id",
            EntityKind::Client => "client_id",
            EntityKind::Editor => "editor_id",
            EntityKind::Manuscript => "manuscript_id",
            EntityKind::SalesRecord => "sales_record_id",
            EntityKind::Salesperson => "salesperson_id",
            EntityKind::Series => "series_id",
        }
    }

    /// Association tables whose rows must go before a row of this kind.
    pub const fn associations(self) -> &'static [Association] {
        match self {
            EntityKind::Author => &[Association::AuthorsBooks, Association::AuthorsManuscripts],
            EntityKind::Book => &[Association::AuthorsBooks],
            EntityKind::Manuscript => &[Association::AuthorsManuscripts],
            _ => &[],
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Many-to-many join tables. Each row pairs an author with a member entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Association {
    AuthorsBooks,
    AuthorsManuscripts,
}

impl Association {
    pub const fn table(self) -> &'static str {
        match self {
            Association::AuthorsBooks => "authors_books",
            Association::AuthorsManuscripts => "authors_manuscripts",
        }
    }

    /// The non-author side of the pair.
    pub const fn member(self) -> EntityKind {
        match self {
            Association::AuthorsBooks => EntityKind::Book,
            Association::AuthorsManuscripts => EntityKind::Manuscript,
        }
    }

    /// The association whose member side is `kind`, if any.
    pub const fn for_member(kind: EntityKind) -> Option<Association> {
        match kind {
            EntityKind::Book => Some(Association::AuthorsBooks),
            EntityKind::Manuscript => Some(Association::AuthorsManuscripts),
            _ => None,
        }
    }

    /// Column holding `kind`'s id in this table, if `kind` is on either side.
    pub fn column_for(self, kind: EntityKind) -> Option<&'static str> {
        if kind == EntityKind::Author || kind == self.member() {
            Some(kind.id_column())
        } else {
            None
        }
    }
}

/// Capability set shared by every row type: identity, table descriptor,
/// declared parameters, construction and field assignment.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The not-yet-persisted form produced by the model builder.
    type New: Clone + Serialize + Send + Sync + 'static;

    const KIND: EntityKind;

    /// Parameters accepted on create and update, in request order.
    const PARAMS: &'static [ParamSpec];

    fn id(&self) -> DbId;

    /// Assemble the new-row form from validated values.
    fn build(values: ValidatedParams) -> Result<Self::New, CoreError>;

    /// Overwrite one field with a validated value.
    fn assign(&mut self, field: &str, value: ParamValue) -> Result<(), CoreError>;
}

/// Error for [`Entity::assign`] on a field the entity does not have.
pub fn unknown_field(kind: EntityKind, field: &str) -> CoreError {
    CoreError::Internal(format!("{kind} has no assignable field '{field}'"))
}
