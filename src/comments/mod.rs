use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

pub use repo::CommentRepo;
pub use repo_types::Comment;

pub fn router() -> Router<AppState> {
    handlers::comment_routes()
}
