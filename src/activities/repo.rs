use async_trait::async_trait;
use sqlx::types::Json;

use super::repo_types::{Activity, ActivityRow, NewActivity};
use crate::{error::ModelResult, store::PgStore};

#[async_trait]
pub trait ActivityRepo: Send + Sync {
    /// Append a record; the store assigns `id` and `created_at`.
    async fn insert_activity(&self, new: NewActivity<'_>) -> ModelResult<Activity>;

    /// History of one entity, oldest first.
    async fn activities_for_entity(&self, entity_id: &str) -> ModelResult<Vec<Activity>>;
}

#[async_trait]
impl ActivityRepo for PgStore {
    async fn insert_activity(&self, new: NewActivity<'_>) -> ModelResult<Activity> {
        let row = sqlx::query_as::<_, ActivityRow>(
            r#"
            INSERT INTO activities (user_id, entity_id, type, action, entry)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, entity_id, type, action, entry, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.entity_id)
        .bind(new.kind.as_str())
        .bind(new.action.as_str())
        .bind(Json(&new.entry))
        .fetch_one(self.pool())
        .await?;
        row.try_into()
    }

    async fn activities_for_entity(&self, entity_id: &str) -> ModelResult<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, user_id, entity_id, type, action, entry, created_at
              FROM activities
             WHERE entity_id = $1
             ORDER BY id ASC
            "#,
        )
        .bind(entity_id)
        .fetch_all(self.pool())
        .await?;
        rows.into_iter().map(Activity::try_from).collect()
    }
}
