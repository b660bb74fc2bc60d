use std::sync::Arc;

use risuspubl_core::commons::Commons;
use risuspubl_core::store::{EntityStore, Store};
use risuspubl_db::models::author::Author;
use risuspubl_db::models::book::Book;
use risuspubl_db::models::client::Client;
use risuspubl_db::models::editor::Editor;
use risuspubl_db::models::manuscript::Manuscript;
use risuspubl_db::models::sales_record::SalesRecord;
use risuspubl_db::models::salesperson::Salesperson;
use risuspubl_db::models::series::Series;

use crate::config::ServerConfig;

/// A storage backend able to serve every resource of the API.
///
/// Implemented automatically for any store covering all eight entities,
/// which includes both `PgStore` and `MemoryStore`.
pub trait Backend:
    Store
    + EntityStore<Author>
    + EntityStore<Book>
    + EntityStore<Client>
    + EntityStore<Editor>
    + EntityStore<Manuscript>
    + EntityStore<SalesRecord>
    + EntityStore<Salesperson>
    + EntityStore<Series>
    + Clone
    + 'static
{
}

impl<T> Backend for T where
    T: Store
        + EntityStore<Author>
        + EntityStore<Book>
        + EntityStore<Client>
        + EntityStore<Editor>
        + EntityStore<Manuscript>
        + EntityStore<SalesRecord>
        + EntityStore<Salesperson>
        + EntityStore<Series>
        + Clone
        + 'static
{
}

/// Shared application state available to all Axum handlers via
/// `State<AppState<S>>`.
///
/// Cheaply cloneable: the store shares its pool or data, the rest is behind
/// `Arc`.
#[derive(Clone)]
pub struct AppState<S> {
    /// Storage backend.
    pub store: S,
    /// Validator and foreign-key tables used by create, update and delete.
    pub commons: Arc<Commons>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl<S: Backend> AppState<S> {
    pub fn new(store: S, config: ServerConfig) -> Self {
        Self {
            store,
            commons: Arc::new(Commons::standard()),
            config: Arc::new(config),
        }
    }
}
