use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{BoardDetails, CreateBoardRequest, CreatedBoard, UpdateBoardRequest},
    repo_types::Board,
};
use crate::{auth::AuthUser, error::reject, model::EntityId, state::AppState};

pub fn board_routes() -> Router<AppState> {
    Router::new().route("/boards", post(create_board)).route(
        "/boards/:id",
        get(get_board).patch(update_board).delete(drop_board),
    )
}

#[instrument(skip(state, payload))]
pub async fn create_board(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateBoardRequest>,
) -> Result<(StatusCode, Json<CreatedBoard>), (StatusCode, String)> {
    let board = Board::create(state.store.as_ref(), &user_id, payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(board)))
}

#[instrument(skip(state))]
pub async fn get_board(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<BoardDetails>, (StatusCode, String)> {
    let board = Board::find_by_id(state.store.as_ref(), &id)
        .await
        .map_err(reject)?;
    Ok(Json(board))
}

#[instrument(skip(state, payload))]
pub async fn update_board(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBoardRequest>,
) -> Result<Response, (StatusCode, String)> {
    let updated = Board::update(state.store.as_ref(), &user_id, &id, payload)
        .await
        .map_err(reject)?;
    Ok(match updated {
        Some(board) => Json(board).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[instrument(skip(state))]
pub async fn drop_board(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<EntityId>, (StatusCode, String)> {
    let dropped = Board::drop(state.store.as_ref(), &id).await.map_err(reject)?;
    Ok(Json(dropped))
}
