use serde::Serialize;
use sqlx::FromRow;

use crate::{
    error::ModelResult,
    model::{non_empty, UpdateField},
};

pub(crate) const MAX_TITLE_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Board {
    pub id: String,
    pub title: String,
}

impl Board {
    pub fn link(&self) -> String {
        board_link(&self.id)
    }
}

pub fn board_link(board_id: &str) -> String {
    format!("/boards/{board_id}")
}

/// Updatable board columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardField {
    Title(String),
}

impl UpdateField for BoardField {
    fn column(&self) -> &'static str {
        match self {
            BoardField::Title(_) => "title",
        }
    }

    fn value(&self) -> &str {
        match self {
            BoardField::Title(v) => v,
        }
    }

    fn validate(&self) -> ModelResult<()> {
        match self {
            BoardField::Title(v) => non_empty("title", v, MAX_TITLE_LEN),
        }
    }
}
