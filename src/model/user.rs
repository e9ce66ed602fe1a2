use serde::{Deserialize, Serialize};

/// A user as returned by the user lookup API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
}

impl UserRecord {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        UserRecord {
            id,
            name: name.into(),
        }
    }
}
