use serde::{Deserialize, Serialize};

use super::repo_types::BoardField;
use crate::{activities::Activity, cards::dto::CardSummary};

#[derive(Debug, Default, Deserialize)]
pub struct CreateBoardRequest {
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateBoardRequest {
    pub title: Option<String>,
}

impl UpdateBoardRequest {
    pub fn into_fields(self) -> Vec<BoardField> {
        self.title.into_iter().map(BoardField::Title).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBoard {
    pub id: String,
    pub title: String,
    pub link: String,
    pub activity: Activity,
}

#[derive(Debug, Serialize)]
pub struct UpdatedBoard {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub activity: Activity,
}

#[derive(Debug, Serialize)]
pub struct BoardDetails {
    pub id: String,
    pub title: String,
    pub link: String,
    pub lists: Vec<BoardList>,
}

/// A non-archived list of a board with its non-archived cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardList {
    pub id: String,
    pub title: String,
    pub cards: Vec<CardSummary>,
}
