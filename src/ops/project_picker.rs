use crate::model::project::ProjectRecord;

/// Project chooser for logging work against a project.
///
/// Unlike tag autocomplete this matches client and display names too, and is
/// not capped.
#[derive(Debug, Clone, Default)]
pub struct ProjectPicker {
    all: Vec<ProjectRecord>,
    filtered: Vec<ProjectRecord>,
    query: String,
}

impl ProjectPicker {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        ProjectPicker {
            filtered: projects.clone(),
            all: projects,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filtered(&self) -> &[ProjectRecord] {
        &self.filtered
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
    }

    fn refilter(&mut self) {
        if self.query.trim().is_empty() {
            self.filtered = self.all.clone();
            return;
        }
        let needle = self.query.to_lowercase();
        self.filtered = self
            .all
            .iter()
            .filter(|p| {
                [
                    Some(p.name.as_str()),
                    p.client_name.as_deref(),
                    p.display_name.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
    }
}
