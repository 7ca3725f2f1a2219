use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;

use crate::error::ModelError;

/// Kind of entity an activity points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Board,
    List,
    Card,
    Comment,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Board => "board",
            EntityKind::List => "list",
            EntityKind::Card => "card",
            EntityKind::Comment => "comment",
        }
    }

    /// Table holding rows of this kind.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Board => "boards",
            EntityKind::List => "lists",
            EntityKind::Card => "cards",
            EntityKind::Comment => "comments",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "board" | "boards" => Ok(EntityKind::Board),
            "list" | "lists" => Ok(EntityKind::List),
            "card" | "cards" => Ok(EntityKind::Card),
            "comment" | "comments" => Ok(EntityKind::Comment),
            other => Err(format!("unknown entity type {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Created,
    Updated,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Created => "Created",
            Action::Updated => "Updated",
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Created" => Ok(Action::Created),
            "Updated" => Ok(Action::Updated),
            other => Err(format!("unknown activity action {other:?}")),
        }
    }
}

/// Snapshot of the target entity at the time of the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// One append-only audit record.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: i64,
    pub action: Action,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub entry: Entry,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip)]
    pub user_id: String,
    #[serde(skip)]
    pub entity_id: String,
}

/// Activity about to be appended; id and timestamp are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewActivity<'a> {
    pub user_id: &'a str,
    pub entity_id: &'a str,
    pub kind: EntityKind,
    pub action: Action,
    pub entry: Entry,
}

#[derive(Debug, FromRow)]
pub(crate) struct ActivityRow {
    pub id: i64,
    pub user_id: String,
    pub entity_id: String,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub action: String,
    pub entry: Json<Entry>,
    pub created_at: OffsetDateTime,
}

impl TryFrom<ActivityRow> for Activity {
    type Error = ModelError;

    fn try_from(r: ActivityRow) -> Result<Self, Self::Error> {
        let decode = |msg: String| ModelError::Database(sqlx::Error::Decode(msg.into()));
        Ok(Self {
            id: r.id,
            action: r.action.parse().map_err(decode)?,
            kind: r.kind.parse().map_err(decode)?,
            entry: r.entry.0,
            created_at: r.created_at,
            user_id: r.user_id,
            entity_id: r.entity_id,
        })
    }
}
