//! In-process store.
//!
//! Rows are kept as JSON objects keyed by table and primary key, so any
//! [`Entity`] round-trips through serde. Referential behaviour matches the
//! PostgreSQL schema: deleting a row that another row still references
//! fails, association rows are unique, and each mutation is applied under a
//! single lock so a cascading delete is all-or-nothing.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{EntityStore, Store};
use crate::entity::{Association, Entity, EntityKind};
use crate::error::CoreError;
use crate::types::DbId;

type Row = Map<String, Value>;

/// One applied mutation, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Insert {
        kind: EntityKind,
        id: DbId,
    },
    Update {
        kind: EntityKind,
        id: DbId,
    },
    Delete {
        kind: EntityKind,
        id: DbId,
    },
    Link {
        association: Association,
        author_id: DbId,
        member_id: DbId,
    },
    Unlink {
        association: Association,
        author_id: DbId,
        member_id: DbId,
    },
}

#[derive(Debug, Default)]
struct Inner {
    tables: BTreeMap<EntityKind, BTreeMap<DbId, Row>>,
    /// `(author_id, member_id)` pairs per association table.
    links: BTreeMap<Association, BTreeSet<(DbId, DbId)>>,
    /// Highest primary key handed out or seeded per table. Never decreases,
    /// so ids of deleted rows are not reused.
    sequences: BTreeMap<EntityKind, DbId>,
    journal: Vec<Mutation>,
}

impl Inner {
    fn contains(&self, kind: EntityKind, id: DbId) -> bool {
        self.tables
            .get(&kind)
            .is_some_and(|rows| rows.contains_key(&id))
    }

    fn next_id(&mut self, kind: EntityKind) -> DbId {
        let id = self.sequences.get(&kind).map_or(1, |last| last + 1);
        self.sequences.insert(kind, id);
        id
    }

    fn put_row(&mut self, kind: EntityKind, id: DbId, mut row: Row) -> Row {
        row.insert(kind.id_column().to_string(), Value::from(id));
        self.tables.entry(kind).or_default().insert(id, row.clone());
        let last = self.sequences.entry(kind).or_default();
        *last = (*last).max(id);
        row
    }

    /// Members of `association` linked to every author in `author_ids`.
    fn shared_members(&self, association: Association, author_ids: &[DbId]) -> Vec<DbId> {
        let Some((first, rest)) = author_ids.split_first() else {
            return Vec::new();
        };
        let Some(pairs) = self.links.get(&association) else {
            return Vec::new();
        };
        self.linked_pairs(association, EntityKind::Author, *first)
            .into_iter()
            .map(|(_, member_id)| member_id)
            .filter(|member_id| rest.iter().all(|author_id| pairs.contains(&(*author_id, *member_id))))
            .collect()
    }

    fn link(&mut self, association: Association, author_id: DbId, member_id: DbId) -> Result<(), CoreError> {
        if !self.contains(EntityKind::Author, author_id) {
            return Err(CoreError::NotFound {
                entity: EntityKind::Author.name(),
                id: author_id,
            });
        }
        let member = association.member();
        if !self.contains(member, member_id) {
            return Err(CoreError::NotFound {
                entity: member.name(),
                id: member_id,
            });
        }
        let inserted = self
            .links
            .entry(association)
            .or_default()
            .insert((author_id, member_id));
        if !inserted {
            return Err(CoreError::Conflict(format!(
                "author {author_id} is already linked to {} {member_id}",
                member.name()
            )));
        }
        self.journal.push(Mutation::Link {
            association,
            author_id,
            member_id,
        });
        Ok(())
    }

    /// Table of the first row (other than the row itself) holding a
    /// reference to `kind`/`id`.
    fn referenced_by(&self, kind: EntityKind, id: DbId) -> Option<&'static str> {
        let column = kind.id_column();
        let needle = Value::from(id);
        self.tables
            .iter()
            .filter(|(other, _)| **other != kind)
            .find(|(_, rows)| rows.values().any(|row| row.get(column) == Some(&needle)))
            .map(|(other, _)| other.table())
    }

    fn linked_pairs(&self, association: Association, kind: EntityKind, id: DbId) -> Vec<(DbId, DbId)> {
        let on_author_side = kind == EntityKind::Author;
        self.links
            .get(&association)
            .map(|pairs| {
                pairs
                    .iter()
                    .filter(|(author_id, member_id)| {
                        if on_author_side {
                            *author_id == id
                        } else {
                            *member_id == id
                        }
                    })
                    .copied()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn to_row<T: Serialize>(value: &T) -> Result<Row, CoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(row)) => Ok(row),
        Ok(other) => Err(CoreError::Internal(format!(
            "expected a JSON object row, got {other}"
        ))),
        Err(e) => Err(CoreError::Internal(format!("row serialization failed: {e}"))),
    }
}

fn from_row<E: DeserializeOwned>(row: Row) -> Result<E, CoreError> {
    serde_json::from_value(Value::Object(row))
        .map_err(|e| CoreError::Internal(format!("row deserialization failed: {e}")))
}

/// Thread-safe in-memory [`Store`]. Cloning shares the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> Result<T, CoreError>) -> Result<T, CoreError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| CoreError::Internal("memory store lock poisoned".to_string()))?;
        f(&mut inner)
    }

    /// Store a row under an explicit primary key, replacing any existing row.
    pub fn seed_row(&self, kind: EntityKind, id: DbId, row: Value) -> Result<(), CoreError> {
        let Value::Object(row) = row else {
            return Err(CoreError::Internal("seed rows must be JSON objects".to_string()));
        };
        self.with_inner(|inner| {
            inner.put_row(kind, id, row);
            Ok(())
        })
    }

    /// Store an entity under its own primary key.
    pub fn seed<E: Entity>(&self, entity: &E) -> Result<(), CoreError> {
        let row = to_row(entity)?;
        self.with_inner(|inner| {
            inner.put_row(E::KIND, entity.id(), row);
            Ok(())
        })
    }

    /// Add an association row between two existing rows.
    pub fn link(&self, association: Association, author_id: DbId, member_id: DbId) -> Result<(), CoreError> {
        self.with_inner(|inner| inner.link(association, author_id, member_id))
    }

    /// Current `(author_id, member_id)` pairs of an association table.
    pub fn links(&self, association: Association) -> Result<Vec<(DbId, DbId)>, CoreError> {
        self.with_inner(|inner| {
            Ok(inner
                .links
                .get(&association)
                .map(|pairs| pairs.iter().copied().collect())
                .unwrap_or_default())
        })
    }

    /// Every mutation applied so far, oldest first.
    pub fn journal(&self) -> Result<Vec<Mutation>, CoreError> {
        self.with_inner(|inner| Ok(inner.journal.clone()))
    }

    pub fn row_count(&self, kind: EntityKind) -> Result<usize, CoreError> {
        self.with_inner(|inner| Ok(inner.tables.get(&kind).map_or(0, BTreeMap::len)))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), CoreError> {
        self.with_inner(|_| Ok(()))
    }

    async fn exists(&self, kind: EntityKind, id: DbId) -> Result<bool, CoreError> {
        self.with_inner(|inner| Ok(inner.contains(kind, id)))
    }

    async fn delete_cascade(
        &self,
        kind: EntityKind,
        id: DbId,
        associations: &[Association],
    ) -> Result<u64, CoreError> {
        self.with_inner(|inner| {
            if !inner.contains(kind, id) {
                return Err(CoreError::NotFound {
                    entity: kind.name(),
                    id,
                });
            }
            if let Some(table) = inner.referenced_by(kind, id) {
                return Err(CoreError::Integrity(format!(
                    "{} {id} is still referenced from the `{table}` table",
                    kind.name()
                )));
            }
            let kept_links = inner
                .links
                .keys()
                .copied()
                .filter(|assoc| !associations.contains(assoc) && assoc.column_for(kind).is_some())
                .find(|assoc| !inner.linked_pairs(*assoc, kind, id).is_empty());
            if let Some(assoc) = kept_links {
                return Err(CoreError::Integrity(format!(
                    "{} {id} is still referenced from the `{}` table",
                    kind.name(),
                    assoc.table()
                )));
            }

            let mut removed = 0;
            for &association in associations {
                for (author_id, member_id) in inner.linked_pairs(association, kind, id) {
                    if let Some(pairs) = inner.links.get_mut(&association) {
                        pairs.remove(&(author_id, member_id));
                    }
                    inner.journal.push(Mutation::Unlink {
                        association,
                        author_id,
                        member_id,
                    });
                    removed += 1;
                }
            }
            if let Some(rows) = inner.tables.get_mut(&kind) {
                rows.remove(&id);
            }
            inner.journal.push(Mutation::Delete { kind, id });
            Ok(removed)
        })
    }
}

#[async_trait]
impl<E: Entity> EntityStore<E> for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<E>, CoreError> {
        let row = self.with_inner(|inner| {
            Ok(inner
                .tables
                .get(&E::KIND)
                .and_then(|rows| rows.get(&id))
                .cloned())
        })?;
        row.map(from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<E>, CoreError> {
        let rows = self.with_inner(|inner| {
            Ok(inner
                .tables
                .get(&E::KIND)
                .map(|rows| rows.values().cloned().collect::<Vec<_>>())
                .unwrap_or_default())
        })?;
        rows.into_iter().map(from_row).collect()
    }

    async fn insert(&self, new: &E::New) -> Result<E, CoreError> {
        let row = to_row(new)?;
        let stored = self.with_inner(|inner| {
            let id = inner.next_id(E::KIND);
            let stored = inner.put_row(E::KIND, id, row);
            inner.journal.push(Mutation::Insert { kind: E::KIND, id });
            Ok(stored)
        })?;
        from_row(stored)
    }

    async fn save(&self, entity: &E) -> Result<E, CoreError> {
        let row = to_row(entity)?;
        let id = entity.id();
        let stored = self.with_inner(|inner| {
            if !inner.contains(E::KIND, id) {
                return Err(CoreError::NotFound {
                    entity: E::KIND.name(),
                    id,
                });
            }
            let stored = inner.put_row(E::KIND, id, row);
            inner.journal.push(Mutation::Update { kind: E::KIND, id });
            Ok(stored)
        })?;
        from_row(stored)
    }

    async fn insert_linked(
        &self,
        new: &E::New,
        association: Association,
        author_ids: &[DbId],
    ) -> Result<E, CoreError> {
        super::check_link_request(E::KIND, association, author_ids)?;
        let row = to_row(new)?;
        let stored = self.with_inner(|inner| {
            if let Some(&author_id) = author_ids
                .iter()
                .find(|id| !inner.contains(EntityKind::Author, **id))
            {
                return Err(CoreError::NotFound {
                    entity: EntityKind::Author.name(),
                    id: author_id,
                });
            }
            let id = inner.next_id(E::KIND);
            let stored = inner.put_row(E::KIND, id, row);
            inner.journal.push(Mutation::Insert { kind: E::KIND, id });
            for &author_id in author_ids {
                inner.link(association, author_id, id)?;
            }
            Ok(stored)
        })?;
        from_row(stored)
    }

    async fn list_linked(&self, association: Association, author_ids: &[DbId]) -> Result<Vec<E>, CoreError> {
        let rows = self.with_inner(|inner| {
            let member_ids = inner.shared_members(association, author_ids);
            Ok(inner
                .tables
                .get(&E::KIND)
                .map(|rows| {
                    member_ids
                        .iter()
                        .filter_map(|id| rows.get(id).cloned())
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default())
        })?;
        rows.into_iter().map(from_row).collect()
    }
}
