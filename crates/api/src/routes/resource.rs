//! Route definitions shared by every entity resource.

use axum::routing::get;
use axum::Router;
use risuspubl_core::entity::Entity;
use risuspubl_core::store::EntityStore;

use crate::handlers::resource;
use crate::state::AppState;

/// Item routes: `/{id}` with GET, PUT, PATCH and DELETE.
fn item_routes<E, S>() -> Router<AppState<S>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    Router::new().route(
        "/{id}",
        get(resource::get_by_id::<E, S>)
            .put(resource::update::<E, S>)
            .patch(resource::update::<E, S>)
            .delete(resource::delete::<E, S>),
    )
}

/// Routes for an independently created entity.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router<E, S>() -> Router<AppState<S>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    Router::new()
        .route("/", get(resource::list::<E, S>).post(resource::create::<E, S>))
        .merge(item_routes::<E, S>())
}

/// Routes for an entity created through an author: the same as [`router`]
/// without `POST /`.
pub fn linked_router<E, S>() -> Router<AppState<S>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    Router::new()
        .route("/", get(resource::list::<E, S>))
        .merge(item_routes::<E, S>())
}
