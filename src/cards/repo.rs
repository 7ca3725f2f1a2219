use async_trait::async_trait;

use super::repo_types::{Card, CardField};
use crate::{
    activities::EntityKind,
    error::ModelResult,
    model::update_query,
    store::PgStore,
};

const SELECT_CARD: &str = r#"
    SELECT c.id, c.text, c.archived, lc.list_id, bl.board_id
      FROM cards c
      JOIN lists_cards lc ON lc.card_id = c.id
      JOIN boards_lists bl ON bl.list_id = lc.list_id
"#;

#[async_trait]
pub trait CardRepo: Send + Sync {
    /// Insert the card and link it to `list_id` in one transaction.
    async fn insert_card(&self, list_id: &str, id: &str, text: &str) -> ModelResult<Card>;
    async fn update_card(&self, id: &str, fields: &[CardField]) -> ModelResult<Option<String>>;
    /// Delete the card and its comments in one transaction, returning the
    /// card as it was (with its owners).
    async fn delete_card(&self, id: &str) -> ModelResult<Option<Card>>;
    async fn archive_card(&self, id: &str) -> ModelResult<Option<String>>;
    async fn find_card(&self, id: &str) -> ModelResult<Option<Card>>;
    /// Non-archived cards of a list, in creation order.
    async fn cards_for_list(&self, list_id: &str) -> ModelResult<Vec<Card>>;
}

#[async_trait]
impl CardRepo for PgStore {
    async fn insert_card(&self, list_id: &str, id: &str, text: &str) -> ModelResult<Card> {
        let mut tx = self.pool().begin().await?;
        sqlx::query(r#"INSERT INTO cards (id, text) VALUES ($1, $2)"#)
            .bind(id)
            .bind(text)
            .execute(&mut *tx)
            .await?;
        sqlx::query(r#"INSERT INTO lists_cards (list_id, card_id) VALUES ($1, $2)"#)
            .bind(list_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let card = sqlx::query_as::<_, Card>(&format!("{SELECT_CARD} WHERE c.id = $1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(card)
    }

    async fn update_card(&self, id: &str, fields: &[CardField]) -> ModelResult<Option<String>> {
        let mut qb = update_query(EntityKind::Card.table(), id, fields);
        qb.push(" RETURNING id");
        let id = qb
            .build_query_scalar::<String>()
            .fetch_optional(self.pool())
            .await?;
        Ok(id)
    }

    async fn delete_card(&self, id: &str) -> ModelResult<Option<Card>> {
        let mut tx = self.pool().begin().await?;
        sqlx::query(
            r#"DELETE FROM comments WHERE id IN (SELECT comment_id FROM cards_comments WHERE card_id = $1)"#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        let card = sqlx::query_as::<_, Card>(
            r#"
            WITH owner AS (
                SELECT lc.list_id, bl.board_id
                  FROM lists_cards lc
                  JOIN boards_lists bl ON bl.list_id = lc.list_id
                 WHERE lc.card_id = $1
            )
            DELETE FROM cards c
             WHERE c.id = $1
            RETURNING c.id, c.text, c.archived,
                      (SELECT list_id FROM owner) AS list_id,
                      (SELECT board_id FROM owner) AS board_id
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(card)
    }

    async fn archive_card(&self, id: &str) -> ModelResult<Option<String>> {
        let id = sqlx::query_scalar::<_, String>(
            r#"UPDATE cards SET archived = true WHERE id = $1 RETURNING id"#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(id)
    }

    async fn find_card(&self, id: &str) -> ModelResult<Option<Card>> {
        let card = sqlx::query_as::<_, Card>(&format!("{SELECT_CARD} WHERE c.id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(card)
    }

    async fn cards_for_list(&self, list_id: &str) -> ModelResult<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(&format!(
            "{SELECT_CARD} WHERE lc.list_id = $1 AND NOT c.archived ORDER BY c.created_at ASC, c.id ASC"
        ))
        .bind(list_id)
        .fetch_all(self.pool())
        .await?;
        Ok(cards)
    }
}
