use async_trait::async_trait;

use super::repo_types::{List, ListField};
use crate::{
    activities::EntityKind,
    error::ModelResult,
    model::update_query,
    store::PgStore,
};

#[async_trait]
pub trait ListRepo: Send + Sync {
    /// Insert the list and link it to `board_id` in one transaction.
    async fn insert_list(&self, board_id: &str, id: &str, title: &str) -> ModelResult<List>;
    async fn update_list(&self, id: &str, fields: &[ListField]) -> ModelResult<Option<String>>;
    /// Delete the list with its cards and their comments in one transaction.
    async fn delete_list(&self, id: &str) -> ModelResult<Option<String>>;
    async fn archive_list(&self, id: &str) -> ModelResult<Option<String>>;
    async fn find_list(&self, id: &str) -> ModelResult<Option<List>>;
    /// Non-archived lists of a board, in creation order.
    async fn lists_for_board(&self, board_id: &str) -> ModelResult<Vec<List>>;
}

#[async_trait]
impl ListRepo for PgStore {
    async fn insert_list(&self, board_id: &str, id: &str, title: &str) -> ModelResult<List> {
        let mut tx = self.pool().begin().await?;
        let list = sqlx::query_as::<_, List>(
            r#"
            INSERT INTO lists (id, title) VALUES ($1, $2)
            RETURNING id, title, archived
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(r#"INSERT INTO boards_lists (board_id, list_id) VALUES ($1, $2)"#)
            .bind(board_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(list)
    }

    async fn update_list(&self, id: &str, fields: &[ListField]) -> ModelResult<Option<String>> {
        let mut qb = update_query(EntityKind::List.table(), id, fields);
        qb.push(" RETURNING id");
        let id = qb
            .build_query_scalar::<String>()
            .fetch_optional(self.pool())
            .await?;
        Ok(id)
    }

    async fn delete_list(&self, id: &str) -> ModelResult<Option<String>> {
        let mut tx = self.pool().begin().await?;
        sqlx::query(
            r#"
            DELETE FROM comments
             WHERE id IN (SELECT cc.comment_id
                            FROM cards_comments cc
                            JOIN lists_cards lc ON lc.card_id = cc.card_id
                           WHERE lc.list_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            r#"DELETE FROM cards WHERE id IN (SELECT card_id FROM lists_cards WHERE list_id = $1)"#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let id = sqlx::query_scalar::<_, String>(r#"DELETE FROM lists WHERE id = $1 RETURNING id"#)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn archive_list(&self, id: &str) -> ModelResult<Option<String>> {
        let id = sqlx::query_scalar::<_, String>(
            r#"UPDATE lists SET archived = true WHERE id = $1 RETURNING id"#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(id)
    }

    async fn find_list(&self, id: &str) -> ModelResult<Option<List>> {
        let list = sqlx::query_as::<_, List>(r#"SELECT id, title, archived FROM lists WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(list)
    }

    async fn lists_for_board(&self, board_id: &str) -> ModelResult<Vec<List>> {
        let lists = sqlx::query_as::<_, List>(
            r#"
            SELECT l.id, l.title, l.archived
              FROM lists l
              JOIN boards_lists bl ON bl.list_id = l.id
             WHERE bl.board_id = $1 AND NOT l.archived
             ORDER BY l.created_at ASC, l.id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(self.pool())
        .await?;
        Ok(lists)
    }
}
