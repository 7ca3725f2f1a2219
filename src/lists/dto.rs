use serde::{Deserialize, Serialize};

use super::repo_types::ListField;
use crate::{activities::Activity, cards::dto::CardSummary};

#[derive(Debug, Default, Deserialize)]
pub struct CreateListRequest {
    pub title: Option<String>,
}

/// Unknown keys are ignored; only `title` is recognized.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateListRequest {
    pub title: Option<String>,
}

impl UpdateListRequest {
    pub fn into_fields(self) -> Vec<ListField> {
        self.title.into_iter().map(ListField::Title).collect()
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedList {
    pub id: String,
    pub title: String,
    pub archived: bool,
    pub activity: Activity,
}

/// Id, the columns that were written, and the activity.
#[derive(Debug, Serialize)]
pub struct UpdatedList {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub activity: Activity,
}

#[derive(Debug, Serialize)]
pub struct ListDetails {
    pub id: String,
    pub title: String,
    pub archived: bool,
    pub cards: Vec<CardSummary>,
}
