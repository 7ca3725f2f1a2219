use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use tracing::instrument;

use super::{
    dto::{
        CardDetails, CreateCardRequest, CreatedCard, DroppedCard, EditCardSubmission,
        UpdateCardRequest,
    },
    form::EditCardForm,
    repo_types::Card,
};
use crate::{
    app::API_PREFIX,
    auth::AuthUser,
    error::{reject, ModelError},
    model::EntityId,
    state::AppState,
};

pub fn card_routes() -> Router<AppState> {
    Router::new()
        .route("/lists/:id/cards", post(create_card))
        .route(
            "/cards/:id",
            get(get_card).patch(update_card).delete(drop_card),
        )
        .route("/cards/:id/archive", post(archive_card))
        .route("/cards/:id/edit", get(edit_form).post(submit_edit))
}

#[instrument(skip(state, payload))]
pub async fn create_card(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(list_id): Path<String>,
    Json(payload): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<CreatedCard>), (StatusCode, String)> {
    let card = Card::create(state.store.as_ref(), &user_id, &list_id, payload)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(card)))
}

#[instrument(skip(state))]
pub async fn get_card(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<CardDetails>, (StatusCode, String)> {
    let card = Card::find_by_id(state.store.as_ref(), &id)
        .await
        .map_err(reject)?;
    Ok(Json(card))
}

#[instrument(skip(state, payload))]
pub async fn update_card(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCardRequest>,
) -> Result<Response, (StatusCode, String)> {
    let updated = Card::update(state.store.as_ref(), &user_id, &id, payload)
        .await
        .map_err(reject)?;
    Ok(match updated {
        Some(card) => Json(card).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[instrument(skip(state))]
pub async fn drop_card(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DroppedCard>, (StatusCode, String)> {
    let dropped = Card::drop(state.store.as_ref(), &id).await.map_err(reject)?;
    Ok(Json(dropped))
}

#[instrument(skip(state))]
pub async fn archive_card(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<EntityId>, (StatusCode, String)> {
    let archived = Card::archive(state.store.as_ref(), &id)
        .await
        .map_err(reject)?;
    Ok(Json(archived))
}

#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Html<String>, (StatusCode, String)> {
    let card = find(&state, &id).await?;
    let on_submit = format!("{API_PREFIX}/cards/{}/edit", card.id);
    let on_cancel = card.link();
    let form = EditCardForm {
        text: &card.text,
        on_submit: &on_submit,
        on_cancel: Some(&on_cancel),
    };
    Ok(Html(form.render()))
}

#[instrument(skip(state, form))]
pub async fn submit_edit(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Form(form): Form<EditCardSubmission>,
) -> Result<Redirect, (StatusCode, String)> {
    let data = UpdateCardRequest {
        text: Some(form.text),
    };
    Card::update(state.store.as_ref(), &user_id, &id, data)
        .await
        .map_err(reject)?;
    let card = find(&state, &id).await?;
    Ok(Redirect::to(&card.link()))
}

async fn find(state: &AppState, id: &str) -> Result<Card, (StatusCode, String)> {
    state
        .store
        .find_card(id)
        .await
        .and_then(|card| card.ok_or_else(|| ModelError::not_found("card", id)))
        .map_err(reject)
}
