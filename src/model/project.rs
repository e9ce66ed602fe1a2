use serde::{Deserialize, Serialize};

/// A project as returned by the project lookup API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub name: String,
    /// Usually "Client - Project"; falls back to `name` when absent
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    /// The project new tasks go to when nothing else is chosen
    #[serde(default)]
    pub is_default: bool,
}

impl ProjectRecord {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        ProjectRecord {
            id,
            name: name.into(),
            display_name: None,
            client_name: None,
            is_default: false,
        }
    }

    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
