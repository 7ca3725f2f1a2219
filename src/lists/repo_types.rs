use serde::Serialize;
use sqlx::FromRow;

use crate::{
    boards::repo_types::MAX_TITLE_LEN,
    error::ModelResult,
    model::{non_empty, UpdateField},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct List {
    pub id: String,
    pub title: String,
    pub archived: bool,
}

/// Updatable list columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListField {
    Title(String),
}

impl UpdateField for ListField {
    fn column(&self) -> &'static str {
        match self {
            ListField::Title(_) => "title",
        }
    }

    fn value(&self) -> &str {
        match self {
            ListField::Title(v) => v,
        }
    }

    fn validate(&self) -> ModelResult<()> {
        match self {
            ListField::Title(v) => non_empty("title", v, MAX_TITLE_LEN),
        }
    }
}
