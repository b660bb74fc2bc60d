//! Generic handlers for an entity's collection and item endpoints.
//!
//! Each handler is instantiated per entity in `routes`, e.g.
//! `resource::list::<Editor, S>`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use risuspubl_core::entity::Entity;
use risuspubl_core::error::CoreError;
use risuspubl_core::store::EntityStore;
use risuspubl_core::types::DbId;
use risuspubl_core::validation::optional_params;

use crate::error::{AppError, AppResult};
use crate::params::{body_object, bundle_for, JsonBody};
use crate::state::AppState;

/// GET /api/v1/{resource}
pub async fn list<E, S>(State(state): State<AppState<S>>) -> AppResult<Json<Vec<E>>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let rows = state.store.list().await?;
    Ok(Json(rows))
}

/// GET /api/v1/{resource}/{id}
pub async fn get_by_id<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<DbId>,
) -> AppResult<Json<E>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let row = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: E::KIND.name(),
            id,
        }))?;
    Ok(Json(row))
}

/// POST /api/v1/{resource}
pub async fn create<E, S>(
    State(state): State<AppState<S>>,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<E>)>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let params = bundle_for::<E>(&body_object(body)?)?;
    let new = state
        .commons
        .create_model::<E, S>(&state.store, &params, &optional_params(E::PARAMS))
        .await?;
    let row = state.store.insert(&new).await?;

    tracing::info!(entity = E::KIND.name(), id = row.id(), "Created");
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH or PUT /api/v1/{resource}/{id}
///
/// Both verbs are partial: fields missing from the body keep their value.
pub async fn update<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<DbId>,
    body: JsonBody,
) -> AppResult<Json<E>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let params = bundle_for::<E>(&body_object(body)?)?;
    let changed = state
        .commons
        .update_model::<E, S>(&state.store, id, &params)
        .await?;
    let row = state.store.save(&changed).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/{resource}/{id}
pub async fn delete<E, S>(
    State(state): State<AppState<S>>,
    Path(id): Path<DbId>,
) -> AppResult<Json<bool>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    state.commons.delete_model::<E, S>(&state.store, id).await?;
    Ok(Json(true))
}
