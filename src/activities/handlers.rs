use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::repo_types::Activity;
use crate::{auth::AuthUser, error::reject, state::AppState};

pub fn activity_routes() -> Router<AppState> {
    Router::new().route("/activities/:entity_id", get(list_activities))
}

#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(entity_id): Path<String>,
) -> Result<Json<Vec<Activity>>, (axum::http::StatusCode, String)> {
    let activities = Activity::find_by_entity(state.store.as_ref(), &entity_id)
        .await
        .map_err(reject)?;
    Ok(Json(activities))
}
