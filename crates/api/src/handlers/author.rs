//! Handlers for books and manuscripts reached through their author.
//!
//! Creating a book or manuscript here also writes one association row per
//! author, in the same transaction as the insert. The two-author routes
//! list and create co-authored rows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use risuspubl_core::entity::{Association, Entity, EntityKind};
use risuspubl_core::error::CoreError;
use risuspubl_core::store::{EntityStore, Store};
use risuspubl_core::types::DbId;
use risuspubl_core::validation::optional_params;

use crate::error::{AppError, AppResult};
use crate::params::{body_object, bundle_for, JsonBody};
use crate::state::AppState;

fn association<E: Entity>() -> AppResult<Association> {
    Association::for_member(E::KIND).ok_or_else(|| {
        AppError::InternalError(format!("{} rows are not linked to authors", E::KIND))
    })
}

async fn require_authors<S: Store + ?Sized>(store: &S, author_ids: &[DbId]) -> AppResult<()> {
    for &author_id in author_ids {
        if !store.exists(EntityKind::Author, author_id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: EntityKind::Author.name(),
                id: author_id,
            }));
        }
    }
    Ok(())
}

fn author_pair((first, second): (DbId, DbId)) -> AppResult<[DbId; 2]> {
    if first == second {
        return Err(AppError::BadRequest(format!(
            "author {first} cannot be named twice"
        )));
    }
    Ok([first, second])
}

async fn list_for_authors<E, S>(state: &AppState<S>, author_ids: &[DbId]) -> AppResult<Vec<E>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let association = association::<E>()?;
    require_authors(&state.store, author_ids).await?;
    Ok(state.store.list_linked(association, author_ids).await?)
}

async fn create_for_authors<E, S>(
    state: &AppState<S>,
    author_ids: &[DbId],
    body: JsonBody,
) -> AppResult<E>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let association = association::<E>()?;
    require_authors(&state.store, author_ids).await?;

    let params = bundle_for::<E>(&body_object(body)?)?;
    let new = state
        .commons
        .create_model::<E, S>(&state.store, &params, &optional_params(E::PARAMS))
        .await?;
    let row = state
        .store
        .insert_linked(&new, association, author_ids)
        .await?;

    tracing::info!(
        entity = E::KIND.name(),
        id = row.id(),
        ?author_ids,
        "Created for authors"
    );
    Ok(row)
}

/// GET /api/v1/authors/{id}/{books|manuscripts}
pub async fn list_linked<E, S>(
    State(state): State<AppState<S>>,
    Path(author_id): Path<DbId>,
) -> AppResult<Json<Vec<E>>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let rows = list_for_authors::<E, S>(&state, &[author_id]).await?;
    Ok(Json(rows))
}

/// POST /api/v1/authors/{id}/{books|manuscripts}
pub async fn create_linked<E, S>(
    State(state): State<AppState<S>>,
    Path(author_id): Path<DbId>,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<E>)>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let row = create_for_authors::<E, S>(&state, &[author_id], body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/authors/{id}/{second_id}/{books|manuscripts}
///
/// Only rows written by both authors.
pub async fn list_co_linked<E, S>(
    State(state): State<AppState<S>>,
    Path(ids): Path<(DbId, DbId)>,
) -> AppResult<Json<Vec<E>>>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let author_ids = author_pair(ids)?;
    let rows = list_for_authors::<E, S>(&state, &author_ids).await?;
    Ok(Json(rows))
}

/// POST /api/v1/authors/{id}/{second_id}/{books|manuscripts}
pub async fn create_co_linked<E, S>(
    State(state): State<AppState<S>>,
    Path(ids): Path<(DbId, DbId)>,
    body: JsonBody,
) -> AppResult<(StatusCode, Json<E>)>
where
    E: Entity,
    S: EntityStore<E> + Clone + 'static,
{
    let author_ids = author_pair(ids)?;
    let row = create_for_authors::<E, S>(&state, &author_ids, body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}
