use serde::{Deserialize, Serialize};

use super::repo_types::{Card, CardField};
use crate::{activities::Activity, comments::repo_types::CommentWithAuthor};

#[derive(Debug, Default, Deserialize)]
pub struct CreateCardRequest {
    pub text: Option<String>,
}

/// Unknown keys are ignored; only `text` is recognized.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCardRequest {
    pub text: Option<String>,
}

impl UpdateCardRequest {
    pub fn into_fields(self) -> Vec<CardField> {
        self.text.into_iter().map(CardField::Text).collect()
    }
}

/// Url-encoded body posted by the edit form.
#[derive(Debug, Deserialize)]
pub struct EditCardSubmission {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedCard {
    pub id: String,
    pub text: String,
    pub board_id: String,
    pub link: String,
    pub activity: Activity,
}

/// Id, the columns that were written, and the activity. No `board_id`.
#[derive(Debug, Serialize)]
pub struct UpdatedCard {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub activity: Activity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedCard {
    pub id: String,
    pub board_id: String,
}

#[derive(Debug, Serialize)]
pub struct CardDetails {
    pub id: String,
    pub text: String,
    pub link: String,
    pub board_id: String,
    pub comments: Vec<CommentWithAuthor>,
}

/// Card as nested in list and board views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub id: String,
    pub text: String,
    pub link: String,
}

impl From<Card> for CardSummary {
    fn from(c: Card) -> Self {
        Self {
            link: c.link(),
            id: c.id,
            text: c.text,
        }
    }
}
