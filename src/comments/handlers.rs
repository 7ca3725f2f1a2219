use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{patch, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{CreateCommentRequest, CreatedComment, DroppedComment, UpdateCommentRequest},
    repo_types::Comment,
};
use crate::{auth::AuthUser, error::reject, state::AppState};

pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/cards/:id/comments", post(create_comment))
        .route("/comments/:id", patch(update_comment).delete(drop_comment))
}

#[instrument(skip(state, payload))]
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(card_id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CreatedComment>), (StatusCode, String)> {
    let comment = Comment::create(state.store.as_ref(), &user_id, &card_id, payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

#[instrument(skip(state, payload))]
pub async fn update_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<Response, (StatusCode, String)> {
    let updated = Comment::update(state.store.as_ref(), &user_id, &id, payload)
        .await
        .map_err(reject)?;
    Ok(match updated {
        Some(comment) => Json(comment).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[instrument(skip(state))]
pub async fn drop_comment(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DroppedComment>, (StatusCode, String)> {
    let dropped = Comment::drop(state.store.as_ref(), &id)
        .await
        .map_err(reject)?;
    Ok(Json(dropped))
}
