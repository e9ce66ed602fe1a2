use serde::{Deserialize, Serialize};

use crate::model::project::ProjectRecord;
use crate::model::user::UserRecord;
use crate::parse::tag::TagKind;

/// Default cap on autocomplete results
pub const MAX_CANDIDATES: usize = 10;

/// An entry the autocomplete dropdown can offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub kind: TagKind,
    pub id: i64,
    pub name: String,
}

impl From<&ProjectRecord> for Candidate {
    fn from(p: &ProjectRecord) -> Self {
        Candidate {
            kind: TagKind::Project,
            id: p.id,
            name: p.name.clone(),
        }
    }
}

impl From<&UserRecord> for Candidate {
    fn from(u: &UserRecord) -> Self {
        Candidate {
            kind: TagKind::User,
            id: u.id,
            name: u.name.clone(),
        }
    }
}

/// Projects and users available for tagging, in server order.
///
/// Shape matches the lookup APIs: `{"projects": [...], "users": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl Corpus {
    pub fn new(projects: Vec<ProjectRecord>, users: Vec<UserRecord>) -> Self {
        Corpus { projects, users }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.users.is_empty()
    }

    /// The project new tasks default to: the one marked default, else the first
    pub fn default_project(&self) -> Option<&ProjectRecord> {
        self.projects
            .iter()
            .find(|p| p.is_default)
            .or_else(|| self.projects.first())
    }

    pub fn project_by_id(&self, id: i64) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn project_by_name(&self, name: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.name == name)
    }

    pub fn user_by_id(&self, id: i64) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }
}

/// Candidates of `kind` whose name contains `query`, ignoring case.
///
/// Corpus order is kept and at most [`MAX_CANDIDATES`] are returned. An empty
/// query matches everything.
pub fn filter_candidates(query: &str, kind: TagKind, corpus: &Corpus) -> Vec<Candidate> {
    filter_candidates_with_limit(query, kind, corpus, MAX_CANDIDATES)
}

/// [`filter_candidates`] with an explicit cap
pub fn filter_candidates_with_limit(
    query: &str,
    kind: TagKind,
    corpus: &Corpus,
    limit: usize,
) -> Vec<Candidate> {
    let needle = query.to_lowercase();
    match kind {
        TagKind::Project => corpus
            .projects
            .iter()
            .filter(|p| name_matches(&p.name, &needle))
            .take(limit)
            .map(Candidate::from)
            .collect(),
        TagKind::User => corpus
            .users
            .iter()
            .filter(|u| name_matches(&u.name, &needle))
            .take(limit)
            .map(Candidate::from)
            .collect(),
    }
}

/// Case-insensitive substring test; `needle` must already be lowercased
pub(crate) fn name_matches(name: &str, needle: &str) -> bool {
    needle.is_empty() || name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn corpus() -> Corpus {
        let projects = (1..=12)
            .map(|i| ProjectRecord::new(i, format!("Project {}", i)))
            .chain([
                ProjectRecord::new(20, "Optics Lab"),
                ProjectRecord::new(21, "Laser Alignment"),
            ])
            .collect();
        let users = vec![
            UserRecord::new(7, "John"),
            UserRecord::new(8, "Johanna"),
            UserRecord::new(9, "Ann"),
        ];
        Corpus::new(projects, users)
    }

    fn names(cands: &[Candidate]) -> Vec<&str> {
        cands.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_first_ten_in_order() {
        let c = corpus();
        let result = filter_candidates("", TagKind::Project, &c);
        assert_eq!(result.len(), 10);
        let expected: Vec<Candidate> = c.projects[..10].iter().map(Candidate::from).collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn substring_not_prefix() {
        let c = corpus();
        let result = filter_candidates("LAB", TagKind::Project, &c);
        assert_eq!(names(&result), vec!["Optics Lab"]);
        let result = filter_candidates("al", TagKind::Project, &c);
        assert_eq!(names(&result), vec!["Laser Alignment"]);
    }

    #[test]
    fn kind_picks_the_corpus() {
        let c = corpus();
        let result = filter_candidates("joh", TagKind::User, &c);
        assert_eq!(names(&result), vec!["John", "Johanna"]);
        assert!(result.iter().all(|r| r.kind == TagKind::User));
        assert!(filter_candidates("joh", TagKind::Project, &c).is_empty());
    }

    #[test]
    fn empty_corpus_yields_nothing() {
        let c = Corpus::default();
        assert!(filter_candidates("xyz", TagKind::Project, &c).is_empty());
        assert!(filter_candidates("", TagKind::User, &c).is_empty());
    }

    #[test]
    fn explicit_limit() {
        let c = corpus();
        let result = filter_candidates_with_limit("project", TagKind::Project, &c, 3);
        assert_eq!(names(&result), vec!["Project 1", "Project 2", "Project 3"]);
    }

    #[test]
    fn default_project_prefers_flag() {
        let mut c = corpus();
        assert_eq!(c.default_project().map(|p| p.id), Some(1));
        c.projects[4].is_default = true;
        assert_eq!(c.default_project().map(|p| p.id), Some(5));
        assert_eq!(Corpus::default().default_project(), None);
    }
}
