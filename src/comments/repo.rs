use async_trait::async_trait;
use time::OffsetDateTime;

use super::repo_types::{Comment, CommentAuthorRow, CommentField, CommentWithAuthor};
use crate::{
    activities::EntityKind,
    error::ModelResult,
    model::update_query,
    store::PgStore,
};

#[async_trait]
pub trait CommentRepo: Send + Sync {
    /// Insert the comment and link it to its card and author in one transaction.
    async fn insert_comment(
        &self,
        card_id: &str,
        user_id: &str,
        id: &str,
        text: &str,
    ) -> ModelResult<Comment>;
    async fn update_comment(&self, id: &str, fields: &[CommentField])
        -> ModelResult<Option<String>>;
    async fn delete_comment(&self, id: &str) -> ModelResult<Option<Comment>>;
    async fn find_comment(&self, id: &str) -> ModelResult<Option<Comment>>;
    /// Comments of a card in insertion order, with their authors.
    async fn comments_for_card(&self, card_id: &str) -> ModelResult<Vec<CommentWithAuthor>>;
}

#[async_trait]
impl CommentRepo for PgStore {
    async fn insert_comment(
        &self,
        card_id: &str,
        user_id: &str,
        id: &str,
        text: &str,
    ) -> ModelResult<Comment> {
        let mut tx = self.pool().begin().await?;
        let created_at = sqlx::query_scalar::<_, OffsetDateTime>(
            r#"INSERT INTO comments (id, text) VALUES ($1, $2) RETURNING created_at"#,
        )
        .bind(id)
        .bind(text)
        .fetch_one(&mut *tx)
        .await?;
        sqlx::query(r#"INSERT INTO cards_comments (card_id, comment_id) VALUES ($1, $2)"#)
            .bind(card_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(r#"INSERT INTO users_comments (user_id, comment_id) VALUES ($1, $2)"#)
            .bind(user_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Comment {
            id: id.to_owned(),
            text: text.to_owned(),
            created_at,
            card_id: card_id.to_owned(),
            user_id: user_id.to_owned(),
        })
    }

    async fn update_comment(
        &self,
        id: &str,
        fields: &[CommentField],
    ) -> ModelResult<Option<String>> {
        let mut qb = update_query(EntityKind::Comment.table(), id, fields);
        qb.push(" RETURNING id");
        let id = qb
            .build_query_scalar::<String>()
            .fetch_optional(self.pool())
            .await?;
        Ok(id)
    }

    async fn delete_comment(&self, id: &str) -> ModelResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            WITH owner AS (
                SELECT cc.card_id, uc.user_id
                  FROM cards_comments cc
                  JOIN users_comments uc ON uc.comment_id = cc.comment_id
                 WHERE cc.comment_id = $1
            )
            DELETE FROM comments cm
             WHERE cm.id = $1
            RETURNING cm.id, cm.text, cm.created_at,
                      (SELECT card_id FROM owner) AS card_id,
                      (SELECT user_id FROM owner) AS user_id
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(comment)
    }

    async fn find_comment(&self, id: &str) -> ModelResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT cm.id, cm.text, cm.created_at, cc.card_id, uc.user_id
              FROM comments cm
              JOIN cards_comments cc ON cc.comment_id = cm.id
              JOIN users_comments uc ON uc.comment_id = cm.id
             WHERE cm.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(comment)
    }

    async fn comments_for_card(&self, card_id: &str) -> ModelResult<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentAuthorRow>(
            r#"
            SELECT cm.id, cm.text, cm.created_at, u.id AS user_id, u.username, u.avatar
              FROM cards_comments cc
              JOIN comments cm ON cm.id = cc.comment_id
              JOIN users_comments uc ON uc.comment_id = cm.id
              JOIN users u ON u.id = uc.user_id
             WHERE cc.card_id = $1
             ORDER BY cm.created_at ASC, cm.id ASC
            "#,
        )
        .bind(card_id)
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }
}
