use async_trait::async_trait;

use super::repo_types::{Board, BoardField};
use crate::{
    activities::EntityKind,
    error::ModelResult,
    model::update_query,
    store::PgStore,
};

#[async_trait]
pub trait BoardRepo: Send + Sync {
    async fn insert_board(&self, id: &str, title: &str) -> ModelResult<Board>;
    /// Returns the id when the board exists.
    async fn update_board(&self, id: &str, fields: &[BoardField]) -> ModelResult<Option<String>>;
    /// Delete the board with everything under it in one transaction.
    async fn delete_board(&self, id: &str) -> ModelResult<Option<String>>;
    async fn find_board(&self, id: &str) -> ModelResult<Option<Board>>;
}

#[async_trait]
impl BoardRepo for PgStore {
    async fn insert_board(&self, id: &str, title: &str) -> ModelResult<Board> {
        let board = sqlx::query_as::<_, Board>(
            r#"
            INSERT INTO boards (id, title) VALUES ($1, $2)
            RETURNING id, title
            "#,
        )
        .bind(id)
        .bind(title)
        .fetch_one(self.pool())
        .await?;
        Ok(board)
    }

    async fn update_board(&self, id: &str, fields: &[BoardField]) -> ModelResult<Option<String>> {
        let mut qb = update_query(EntityKind::Board.table(), id, fields);
        qb.push(" RETURNING id");
        let id = qb
            .build_query_scalar::<String>()
            .fetch_optional(self.pool())
            .await?;
        Ok(id)
    }

    async fn delete_board(&self, id: &str) -> ModelResult<Option<String>> {
        let mut tx = self.pool().begin().await?;
        sqlx::query(
            r#"
            DELETE FROM comments
             WHERE id IN (SELECT cc.comment_id
                            FROM cards_comments cc
                            JOIN lists_cards lc ON lc.card_id = cc.card_id
                            JOIN boards_lists bl ON bl.list_id = lc.list_id
                           WHERE bl.board_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            r#"
            DELETE FROM cards
             WHERE id IN (SELECT lc.card_id
                            FROM lists_cards lc
                            JOIN boards_lists bl ON bl.list_id = lc.list_id
                           WHERE bl.board_id = $1)
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            r#"DELETE FROM lists WHERE id IN (SELECT list_id FROM boards_lists WHERE board_id = $1)"#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let id = sqlx::query_scalar::<_, String>(r#"DELETE FROM boards WHERE id = $1 RETURNING id"#)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(id)
    }

    async fn find_board(&self, id: &str) -> ModelResult<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(r#"SELECT id, title FROM boards WHERE id = $1"#)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(board)
    }
}
