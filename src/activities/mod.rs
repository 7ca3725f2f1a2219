use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

pub use repo::ActivityRepo;
pub use repo_types::{Action, Activity, EntityKind, Entry};

pub fn router() -> Router<AppState> {
    handlers::activity_routes()
}
