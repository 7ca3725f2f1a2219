use async_trait::async_trait;

use crate::{auth::repo_types::User, error::ModelResult, store::PgStore};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert_user(&self, user: &User) -> ModelResult<User>;
    async fn find_user_by_email(&self, email: &str) -> ModelResult<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> ModelResult<Option<User>>;
}

#[async_trait]
impl UserRepo for PgStore {
    /// Insert a user whose password is already hashed.
    async fn insert_user(&self, user: &User) -> ModelResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, hash, salt, avatar)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, hash, salt, avatar, created_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.hash)
        .bind(&user.salt)
        .bind(&user.avatar)
        .fetch_one(self.pool())
        .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> ModelResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, hash, salt, avatar, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: &str) -> ModelResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, username, email, hash, salt, avatar, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(user)
    }
}
