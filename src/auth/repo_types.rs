use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,                 // short id
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub hash: String,               // argon2 PHC string, not exposed in JSON
    #[serde(skip_serializing)]
    pub salt: String,
    pub avatar: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Public part of a user, embedded in comments and auth responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub avatar: Option<String>,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            username: u.username.clone(),
            avatar: u.avatar.clone(),
        }
    }
}
