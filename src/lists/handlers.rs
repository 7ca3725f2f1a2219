use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateListRequest, CreatedList, ListDetails, UpdateListRequest},
    repo_types::List,
};
use crate::{auth::AuthUser, error::reject, model::EntityId, state::AppState};

pub fn list_routes() -> Router<AppState> {
    Router::new()
        .route("/boards/:id/lists", post(create_list))
        .route(
            "/lists/:id",
            get(get_list).patch(update_list).delete(drop_list),
        )
        .route("/lists/:id/archive", post(archive_list))
}

#[instrument(skip(state, payload))]
pub async fn create_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(board_id): Path<String>,
    Json(payload): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<CreatedList>), (StatusCode, String)> {
    let list = List::create(state.store.as_ref(), &user_id, &board_id, payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(list)))
}

#[instrument(skip(state))]
pub async fn get_list(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ListDetails>, (StatusCode, String)> {
    let list = List::find_by_id(state.store.as_ref(), &id)
        .await
        .map_err(reject)?;
    Ok(Json(list))
}

#[instrument(skip(state, payload))]
pub async fn update_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateListRequest>,
) -> Result<Response, (StatusCode, String)> {
    let updated = List::update(state.store.as_ref(), &user_id, &id, payload)
        .await
        .map_err(reject)?;
    Ok(match updated {
        Some(list) => Json(list).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[instrument(skip(state))]
pub async fn drop_list(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<EntityId>, (StatusCode, String)> {
    let dropped = List::drop(state.store.as_ref(), &id).await.map_err(reject)?;
    Ok(Json(dropped))
}

#[instrument(skip(state))]
pub async fn archive_list(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<EntityId>, (StatusCode, String)> {
    let archived = List::archive(state.store.as_ref(), &id)
        .await
        .map_err(reject)?;
    Ok(Json(archived))
}
