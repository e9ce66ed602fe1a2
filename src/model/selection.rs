use serde::{Deserialize, Serialize};

use super::project::ProjectRecord;
use super::user::UserRecord;

/// The form's reference to the chosen project or assignee.
///
/// `id` is optional because a host may preset a project by name only and the
/// name might not be in the loaded corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Selection {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Selection {
            id: Some(id),
            name: name.into(),
            display_name: None,
        }
    }
}

impl From<&ProjectRecord> for Selection {
    fn from(p: &ProjectRecord) -> Self {
        Selection {
            id: Some(p.id),
            name: p.name.clone(),
            display_name: p.display_name.clone(),
        }
    }
}

impl From<&UserRecord> for Selection {
    fn from(u: &UserRecord) -> Self {
        Selection {
            id: Some(u.id),
            name: u.name.clone(),
            display_name: None,
        }
    }
}
