use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

pub use repo::BoardRepo;
pub use repo_types::Board;

pub fn router() -> Router<AppState> {
    handlers::board_routes()
}
