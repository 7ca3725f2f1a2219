use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

pub use repo::ListRepo;
pub use repo_types::List;

pub fn router() -> Router<AppState> {
    handlers::list_routes()
}
