use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::{
    auth::PublicUser,
    cards::repo_types::MAX_TEXT_LEN,
    error::ModelResult,
    model::{non_empty, UpdateField},
};

/// A comment with the ids of the card it belongs to and its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Comment {
    pub id: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub card_id: String,
    pub user_id: String,
}

/// A comment as embedded in a card: author expanded to public fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentWithAuthor {
    pub id: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user: PublicUser,
}

#[derive(Debug, FromRow)]
pub(crate) struct CommentAuthorRow {
    pub id: String,
    pub text: String,
    pub created_at: OffsetDateTime,
    pub user_id: String,
    pub username: String,
    pub avatar: Option<String>,
}

impl From<CommentAuthorRow> for CommentWithAuthor {
    fn from(r: CommentAuthorRow) -> Self {
        Self {
            id: r.id,
            text: r.text,
            created_at: r.created_at,
            user: PublicUser {
                id: r.user_id,
                username: r.username,
                avatar: r.avatar,
            },
        }
    }
}

/// Updatable comment columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentField {
    Text(String),
}

impl UpdateField for CommentField {
    fn column(&self) -> &'static str {
        match self {
            CommentField::Text(_) => "text",
        }
    }

    fn value(&self) -> &str {
        match self {
            CommentField::Text(v) => v,
        }
    }

    fn validate(&self) -> ModelResult<()> {
        match self {
            CommentField::Text(v) => non_empty("text", v, MAX_TEXT_LEN),
        }
    }
}
