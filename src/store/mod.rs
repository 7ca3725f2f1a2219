//! Persistence seam: one repository trait per entity, combined into [`Store`].

use sqlx::PgPool;

use crate::{
    activities::ActivityRepo, auth::UserRepo, boards::BoardRepo, cards::CardRepo,
    comments::CommentRepo, lists::ListRepo,
};

mod memory;

pub use memory::MemoryStore;

/// Everything the model layer needs from persistence.
pub trait Store: UserRepo + BoardRepo + ListRepo + CardRepo + CommentRepo + ActivityRepo {}

impl<T> Store for T where
    T: UserRepo + BoardRepo + ListRepo + CardRepo + CommentRepo + ActivityRepo
{
}

/// Postgres-backed store; the repository impls live next to each entity.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
