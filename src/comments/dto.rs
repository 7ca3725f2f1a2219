use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::CommentField;
use crate::{activities::Activity, auth::PublicUser};

#[derive(Debug, Default, Deserialize)]
pub struct CreateCommentRequest {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateCommentRequest {
    pub text: Option<String>,
}

impl UpdateCommentRequest {
    pub fn into_fields(self) -> Vec<CommentField> {
        self.text.into_iter().map(CommentField::Text).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedComment {
    pub id: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub card_id: String,
    pub user: PublicUser,
    pub activity: Activity,
}

#[derive(Debug, Serialize)]
pub struct UpdatedComment {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub activity: Activity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedComment {
    pub id: String,
    pub card_id: String,
}
