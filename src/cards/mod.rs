use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod form;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

pub use form::EditCardForm;
pub use repo::CardRepo;
pub use repo_types::Card;

pub fn router() -> Router<AppState> {
    handlers::card_routes()
}
