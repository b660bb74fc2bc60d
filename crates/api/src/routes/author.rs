//! Route definitions for the `/authors` resource.

use axum::routing::get;
use axum::Router;
use risuspubl_db::models::author::Author;
use risuspubl_db::models::book::Book;
use risuspubl_db::models::manuscript::Manuscript;

use super::resource;
use crate::handlers::author;
use crate::state::{AppState, Backend};

/// Routes mounted at `/authors`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// PATCH  /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{id}/books                    -> list_linked
/// POST   /{id}/books                    -> create_linked
/// GET    /{id}/manuscripts              -> list_linked
/// POST   /{id}/manuscripts              -> create_linked
///
/// GET    /{id}/{second_id}/books        -> list_co_linked
/// POST   /{id}/{second_id}/books        -> create_co_linked
/// GET    /{id}/{second_id}/manuscripts  -> list_co_linked
/// POST   /{id}/{second_id}/manuscripts  -> create_co_linked
/// ```
pub fn router<S: Backend>() -> Router<AppState<S>> {
    resource::router::<Author, S>()
        .route(
            "/{id}/books",
            get(author::list_linked::<Book, S>).post(author::create_linked::<Book, S>),
        )
        .route(
            "/{id}/manuscripts",
            get(author::list_linked::<Manuscript, S>)
                .post(author::create_linked::<Manuscript, S>),
        )
        .route(
            "/{id}/{second_id}/books",
            get(author::list_co_linked::<Book, S>).post(author::create_co_linked::<Book, S>),
        )
        .route(
            "/{id}/{second_id}/manuscripts",
            get(author::list_co_linked::<Manuscript, S>)
                .post(author::create_co_linked::<Manuscript, S>),
        )
}
