use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A selectable catalog entry (a profession or a skill) as known to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
