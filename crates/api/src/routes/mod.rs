pub mod author;
pub mod health;
pub mod resource;

use axum::Router;
use risuspubl_db::models::book::Book;
use risuspubl_db::models::client::Client;
use risuspubl_db::models::editor::Editor;
use risuspubl_db::models::manuscript::Manuscript;
use risuspubl_db::models::sales_record::SalesRecord;
use risuspubl_db::models::salesperson::Salesperson;
use risuspubl_db::models::series::Series;

use crate::state::{AppState, Backend};

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /authors                               list, create
/// /authors/{id}                          get, update, delete
/// /authors/{id}/books                    list, create (linked to the author)
/// /authors/{id}/manuscripts              list, create (linked to the author)
/// /authors/{id}/{second_id}/books        list, create (co-authored by both)
/// /authors/{id}/{second_id}/manuscripts  list, create (co-authored by both)
///
/// /books                                 list
/// /books/{id}                            get, update, delete
/// /manuscripts                           list
/// /manuscripts/{id}                      get, update, delete
///
/// /clients                               list, create
/// /clients/{id}                          get, update, delete
/// /editors                               list, create
/// /editors/{id}                          get, update, delete
/// /salespeople                           list, create
/// /salespeople/{id}                      get, update, delete
/// /sales_records                         list, create
/// /sales_records/{id}                    get, update, delete
/// /series                                list, create
/// /series/{id}                           get, update, delete
/// ```
///
/// Updates accept both PATCH and PUT with partial bodies.
pub fn api_routes<S: Backend>() -> Router<AppState<S>> {
    Router::new()
        .nest("/authors", author::router())
        // Books and manuscripts are only created through an author.
        .nest("/books", resource::linked_router::<Book, S>())
        .nest("/manuscripts", resource::linked_router::<Manuscript, S>())
        .nest("/clients", resource::router::<Client, S>())
        .nest("/editors", resource::router::<Editor, S>())
        .nest("/salespeople", resource::router::<Salesperson, S>())
        .nest("/sales_records", resource::router::<SalesRecord, S>())
        .nest("/series", resource::router::<Series, S>())
}
