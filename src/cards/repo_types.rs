use serde::Serialize;
use sqlx::FromRow;

use crate::{
    boards::repo_types::board_link,
    error::ModelResult,
    model::{non_empty, UpdateField},
};

pub(crate) const MAX_TEXT_LEN: usize = 10_000;

/// A card joined with the list and board that own it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Card {
    pub id: String,
    pub text: String,
    pub archived: bool,
    pub list_id: String,
    pub board_id: String,
}

impl Card {
    pub fn link(&self) -> String {
        card_link(&self.board_id, &self.id)
    }
}

/// `/boards/{board_id}/cards/{card_id}`; derived, never stored.
pub fn card_link(board_id: &str, card_id: &str) -> String {
    format!("{}/cards/{card_id}", board_link(board_id))
}

/// Updatable card columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardField {
    Text(String),
}

impl UpdateField for CardField {
    fn column(&self) -> &'static str {
        match self {
            CardField::Text(_) => "text",
        }
    }

    fn value(&self) -> &str {
        match self {
            CardField::Text(v) => v,
        }
    }

    fn validate(&self) -> ModelResult<()> {
        match self {
            CardField::Text(v) => non_empty("text", v, MAX_TEXT_LEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_is_derived_from_board_and_card() {
        assert_eq!(card_link("b1b1b1b1b", "c2c2c2c2c"), "/boards/b1b1b1b1b/cards/c2c2c2c2c");
    }
}
