use serde::{Deserialize, Serialize};

/// A task as embedded in the page data.
///
/// Only `id` and `description` are always present; everything that comes from
/// a join (project, client, assignee, creator) is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: i64,
    /// Free text, may carry committed `#[Project]` / `@[User]` tags
    pub description: String,
    #[serde(default)]
    pub is_complete: bool,
    /// Flagged by the current user
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default, alias = "assigned_to")]
    pub assigned_to_id: Option<i64>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub creator_name: Option<String>,
    /// Creation timestamp as sent by the server (RFC 3339 or naive ISO)
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed_on: Option<String>,
}

impl TaskRecord {
    /// Create a bare task with only an id and description
    pub fn new(id: i64, description: impl Into<String>) -> Self {
        TaskRecord {
            id,
            description: description.into(),
            is_complete: false,
            is_flagged: false,
            project_id: None,
            project_name: None,
            client_name: None,
            assigned_to_id: None,
            assigned_to_name: None,
            creator_name: None,
            created_at: None,
            completed_on: None,
        }
    }

    /// The fields a free-text search looks at, in match order
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.description.as_str()).chain(
            [
                &self.project_name,
                &self.client_name,
                &self.assigned_to_name,
                &self.creator_name,
            ]
            .into_iter()
            .filter_map(|f| f.as_deref()),
        )
    }
}
