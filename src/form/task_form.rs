use serde::Serialize;

use super::autocomplete::{AutocompleteState, Key, Navigation};
use super::signals::{EditorRequest, FormCommand};
use crate::model::selection::Selection;
use crate::ops::candidates::{Candidate, Corpus};
use crate::parse::tag::{TagKind, locate_tag, replace_tag};
use crate::util::unicode::{floor_char_boundary, prev_grapheme_boundary};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("task description is empty")]
    EmptyDescription,
}

/// Result of committing a candidate into the buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub buffer: String,
    pub caret: usize,
    pub kind: TagKind,
    pub selection: Selection,
}

/// What the host should do after passing a key to the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled here; the host applies its default behaviour
    Ignored,
    /// Handled by the dropdown; suppress the default (Enter must not submit)
    Consumed,
    /// A candidate was committed into the buffer
    Committed(Commit),
    /// The dropdown was closed
    Dismissed,
}

impl KeyOutcome {
    pub fn suppresses_default(&self) -> bool {
        !matches!(self, KeyOutcome::Ignored)
    }
}

/// The fields a host posts when the form is submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub description: String,
    pub project_id: Option<i64>,
    pub assigned_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_task_id: Option<i64>,
}

impl Submission {
    /// Form action for an edit, `None` for a new task
    pub fn edit_action(&self) -> Option<String> {
        self.edit_task_id.map(|id| format!("/task/{}/edit", id))
    }
}

/// One task-entry form: the text being typed, the caret, the tag dropdown,
/// and the project/assignee the task will be filed under.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    input: String,
    caret: usize,
    corpus: Corpus,
    autocomplete: AutocompleteState,
    selected_project: Option<Selection>,
    selected_user: Option<Selection>,
    edit_task_id: Option<i64>,
}

impl TaskForm {
    pub fn new(corpus: Corpus) -> Self {
        let mut form = TaskForm::default();
        form.load_corpus(corpus);
        form
    }

    /// Install the project/user corpora and apply the default project
    pub fn load_corpus(&mut self, corpus: Corpus) {
        self.corpus = corpus;
        self.set_default_project();
        self.refresh();
    }

    pub fn set_max_results(&mut self, max_results: usize) {
        self.autocomplete.set_max_results(max_results);
        self.refresh();
    }

    fn set_default_project(&mut self) {
        if let Some(project) = self.corpus.default_project() {
            self.selected_project = Some(Selection::from(project));
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn autocomplete(&self) -> &AutocompleteState {
        &self.autocomplete
    }

    pub fn selected_project(&self) -> Option<&Selection> {
        self.selected_project.as_ref()
    }

    pub fn selected_user(&self) -> Option<&Selection> {
        self.selected_user.as_ref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_task_id.is_some()
    }

    pub fn edit_task_id(&self) -> Option<i64> {
        self.edit_task_id
    }

    fn refresh(&mut self) {
        self.autocomplete
            .refresh(&self.input, self.caret, &self.corpus);
    }

    /// Replace the whole buffer and caret, as an input control reports them
    pub fn set_input(&mut self, text: &str, caret: usize) {
        self.input = text.to_string();
        self.caret = floor_char_boundary(&self.input, caret);
        self.refresh();
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = floor_char_boundary(&self.input, caret);
        self.refresh();
    }

    /// Insert text at the caret
    pub fn insert_str(&mut self, text: &str) {
        self.input.insert_str(self.caret, text);
        self.caret += text.len();
        self.refresh();
    }

    /// Delete the grapheme before the caret
    pub fn delete_back(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.input, self.caret) {
            self.input.replace_range(prev..self.caret, "");
            self.caret = prev;
            self.refresh();
        }
    }

    /// Route a key through the dropdown
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match self.autocomplete.handle_key(key) {
            Navigation::Ignored => KeyOutcome::Ignored,
            Navigation::Moved | Navigation::Held => KeyOutcome::Consumed,
            Navigation::Dismissed => KeyOutcome::Dismissed,
            Navigation::Accept(candidate) => match self.commit(&candidate) {
                Some(commit) => KeyOutcome::Committed(commit),
                None => KeyOutcome::Consumed,
            },
        }
    }

    /// Replace the tag under the caret with `#[name]` / `@[name]` and select
    /// the candidate. Does nothing when the caret is not in a tag.
    pub fn commit(&mut self, candidate: &Candidate) -> Option<Commit> {
        let tag = locate_tag(&self.input, self.caret)?;
        let (buffer, caret) = replace_tag(&self.input, &tag, &candidate.name);
        let selection = Selection::new(candidate.id, candidate.name.clone());

        match tag.kind {
            TagKind::Project => self.selected_project = Some(selection.clone()),
            TagKind::User => self.selected_user = Some(selection.clone()),
        }
        log::debug!(
            "committed {} {:?} (id {})",
            tag.kind.label(),
            candidate.name,
            candidate.id
        );

        self.input = buffer.clone();
        self.caret = caret;
        self.autocomplete.close();

        Some(Commit {
            buffer,
            caret,
            kind: tag.kind,
            selection,
        })
    }

    /// Apply a host command
    pub fn apply(&mut self, command: FormCommand) {
        match command {
            FormCommand::PresetProject {
                id,
                name,
                lookup_by_name,
            } => {
                let found = if lookup_by_name {
                    self.corpus.project_by_name(&name)
                } else {
                    id.and_then(|id| self.corpus.project_by_id(id))
                };
                self.selected_project = Some(match found {
                    Some(project) => Selection::from(project),
                    None => fallback_project(id, name),
                });
            }
            FormCommand::PresetUser { id, name } => {
                self.selected_user = Some(
                    match id.and_then(|id| self.corpus.user_by_id(id)) {
                        Some(user) => Selection::from(user),
                        None => Selection {
                            id,
                            name,
                            display_name: None,
                        },
                    },
                );
            }
            FormCommand::EditTask {
                task_id,
                description,
                project_id,
                project_name,
                user_id,
                user_name,
            } => {
                self.edit_task_id = Some(task_id);
                self.caret = description.len();
                self.input = description;
                // The dropdown waits for the next edit
                self.autocomplete.close();

                if project_id.is_some() || project_name.is_some() {
                    let found = match (project_id, project_name.as_deref()) {
                        (Some(id), _) => self.corpus.project_by_id(id),
                        (None, Some(name)) => self.corpus.project_by_name(name),
                        (None, None) => None,
                    };
                    if let Some(project) = found {
                        self.selected_project = Some(Selection::from(project));
                    } else if let Some(name) = project_name {
                        self.selected_project = Some(fallback_project(project_id, name));
                    }
                }

                if user_id.is_some() || user_name.is_some() {
                    if let Some(user) = user_id.and_then(|id| self.corpus.user_by_id(id)) {
                        self.selected_user = Some(Selection::from(user));
                    } else if let Some(name) = user_name {
                        self.selected_user = Some(Selection {
                            id: user_id,
                            name,
                            display_name: None,
                        });
                    }
                }
            }
        }
    }

    /// Reset and prepare the form for an editor request from a host
    pub fn open(&mut self, request: EditorRequest) {
        self.reset();
        for command in request.into_commands() {
            self.apply(command);
        }
    }

    /// Clear everything back to a fresh form with the default project
    pub fn reset(&mut self) {
        self.input.clear();
        self.caret = 0;
        self.autocomplete.close();
        self.selected_project = None;
        self.selected_user = None;
        self.edit_task_id = None;
        self.set_default_project();
    }

    /// The fields to post. Blank descriptions are refused.
    pub fn submit(&self) -> Result<Submission, FormError> {
        if self.input.trim().is_empty() {
            return Err(FormError::EmptyDescription);
        }
        Ok(Submission {
            description: self.input.clone(),
            project_id: self.selected_project.as_ref().and_then(|p| p.id),
            assigned_to: self.selected_user.as_ref().and_then(|u| u.id),
            edit_task_id: self.edit_task_id,
        })
    }
}

/// Minimal reference for a project the corpus does not know
fn fallback_project(id: Option<i64>, name: String) -> Selection {
    Selection {
        id,
        display_name: Some(name.clone()),
        name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectRecord, UserRecord};
    use pretty_assertions::assert_eq;

    fn corpus() -> Corpus {
        let mut lab = ProjectRecord::new(2, "Optics Lab");
        lab.is_default = true;
        Corpus::new(
            vec![ProjectRecord::new(1, "Laser Rig"), lab],
            vec![UserRecord::new(7, "John"), UserRecord::new(8, "Ann Lee")],
        )
    }

    #[test]
    fn default_project_is_applied() {
        let form = TaskForm::new(corpus());
        assert_eq!(form.selected_project().and_then(|p| p.id), Some(2));
        assert_eq!(form.selected_user(), None);
    }

    #[test]
    fn commit_normalizes_to_brackets() {
        let mut form = TaskForm::new(corpus());
        form.set_input("Fix the @joh bug", 12);
        assert!(form.autocomplete().is_active());

        let john = Candidate {
            kind: TagKind::User,
            id: 7,
            name: "John".into(),
        };
        let commit = form.commit(&john).unwrap();
        assert_eq!(commit.buffer, "Fix the @[John] bug");
        assert_eq!(commit.caret, 15);
        assert_eq!(form.input(), "Fix the @[John] bug");
        assert_eq!(form.selected_user(), Some(&Selection::new(7, "John")));
        assert!(!form.autocomplete().is_active());
    }

    #[test]
    fn commit_without_tag_is_noop() {
        let mut form = TaskForm::new(corpus());
        form.set_input("no tags", 7);
        let cand = Candidate {
            kind: TagKind::User,
            id: 7,
            name: "John".into(),
        };
        assert_eq!(form.commit(&cand), None);
        assert_eq!(form.input(), "no tags");
        assert_eq!(form.selected_user(), None);
    }

    #[test]
    fn enter_flow_commits_highlighted() {
        let mut form = TaskForm::new(corpus());
        form.set_input("Align #las", 10);
        assert_eq!(form.handle_key(Key::Enter), KeyOutcome::Consumed);
        assert_eq!(form.handle_key(Key::ArrowDown), KeyOutcome::Consumed);
        match form.handle_key(Key::Enter) {
            KeyOutcome::Committed(c) => {
                assert_eq!(c.buffer, "Align #[Laser Rig]");
                assert_eq!(c.kind, TagKind::Project);
            }
            other => panic!("expected commit, got {:?}", other),
        }
        assert_eq!(form.selected_project().and_then(|p| p.id), Some(1));
        // Dropdown closed, Enter goes back to the host
        assert_eq!(form.handle_key(Key::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn typing_space_after_commit_stays_closed() {
        let mut form = TaskForm::new(corpus());
        form.set_input("@an", 3);
        form.handle_key(Key::ArrowDown);
        form.handle_key(Key::Enter);
        assert_eq!(form.input(), "@[Ann Lee]");
        form.insert_str(" today");
        assert!(!form.autocomplete().is_active());
        assert_eq!(form.input(), "@[Ann Lee] today");
    }

    #[test]
    fn escape_dismisses_then_typing_reopens() {
        let mut form = TaskForm::new(corpus());
        form.set_input("#opt", 4);
        let outcome = form.handle_key(Key::Escape);
        assert_eq!(outcome, KeyOutcome::Dismissed);
        assert!(outcome.suppresses_default());
        assert!(!form.autocomplete().is_active());
        form.insert_str("i");
        assert!(form.autocomplete().is_active());
        assert_eq!(form.autocomplete().query(), "opti");
    }

    #[test]
    fn delete_back_refilters() {
        let mut form = TaskForm::new(corpus());
        form.set_input("@joz", 4);
        assert!(!form.autocomplete().is_visible());
        form.delete_back();
        assert_eq!(form.input(), "@jo");
        assert!(form.autocomplete().is_visible());
        form.delete_back();
        form.delete_back();
        form.delete_back();
        assert_eq!(form.input(), "");
        assert!(!form.autocomplete().is_active());
    }

    #[test]
    fn preset_project_by_name_and_fallback() {
        let mut form = TaskForm::new(corpus());
        form.apply(FormCommand::PresetProject {
            id: None,
            name: "Laser Rig".into(),
            lookup_by_name: true,
        });
        assert_eq!(form.selected_project().and_then(|p| p.id), Some(1));

        form.apply(FormCommand::PresetProject {
            id: Some(99),
            name: "Archived".into(),
            lookup_by_name: false,
        });
        let p = form.selected_project().unwrap();
        assert_eq!(p.id, Some(99));
        assert_eq!(p.display_name.as_deref(), Some("Archived"));
    }

    #[test]
    fn preset_user() {
        let mut form = TaskForm::new(corpus());
        form.apply(FormCommand::PresetUser {
            id: Some(8),
            name: "ignored".into(),
        });
        assert_eq!(form.selected_user().map(|u| u.name.as_str()), Some("Ann Lee"));
        form.apply(FormCommand::PresetUser {
            id: Some(50),
            name: "Visitor".into(),
        });
        assert_eq!(form.selected_user(), Some(&Selection::new(50, "Visitor")));
    }

    #[test]
    fn edit_task_loads_fields() {
        let mut form = TaskForm::new(corpus());
        form.apply(FormCommand::EditTask {
            task_id: 12,
            description: "Calibrate @[John]".into(),
            project_id: None,
            project_name: Some("Laser Rig".into()),
            user_id: Some(7),
            user_name: Some("John".into()),
        });
        assert!(form.is_edit_mode());
        assert_eq!(form.input(), "Calibrate @[John]");
        assert_eq!(form.caret(), form.input().len());
        assert!(!form.autocomplete().is_active());
        assert_eq!(form.selected_project().and_then(|p| p.id), Some(1));
        assert_eq!(form.selected_user().and_then(|u| u.id), Some(7));

        let sub = form.submit().unwrap();
        assert_eq!(sub.edit_task_id, Some(12));
        assert_eq!(sub.edit_action().as_deref(), Some("/task/12/edit"));
    }

    #[test]
    fn open_new_request_resets() {
        let mut form = TaskForm::new(corpus());
        form.set_input("leftover", 8);
        form.open(EditorRequest::New {
            default_project: Some("Laser Rig".into()),
        });
        assert_eq!(form.input(), "");
        assert!(!form.is_edit_mode());
        assert_eq!(form.selected_project().and_then(|p| p.id), Some(1));
    }

    #[test]
    fn submit_refuses_blank() {
        let mut form = TaskForm::new(corpus());
        form.set_input("   ", 3);
        assert_eq!(form.submit(), Err(FormError::EmptyDescription));
    }

    #[test]
    fn submit_carries_selections() {
        let mut form = TaskForm::new(corpus());
        form.set_input("Ask @jo", 7);
        form.handle_key(Key::ArrowDown);
        form.handle_key(Key::Enter);
        let sub = form.submit().unwrap();
        assert_eq!(sub.description, "Ask @[John]");
        assert_eq!(sub.project_id, Some(2));
        assert_eq!(sub.assigned_to, Some(7));
        assert_eq!(sub.edit_action(), None);
    }

    #[test]
    fn reset_restores_default_project() {
        let mut form = TaskForm::new(corpus());
        form.apply(FormCommand::PresetProject {
            id: Some(1),
            name: "Laser Rig".into(),
            lookup_by_name: false,
        });
        form.set_input("x", 1);
        form.reset();
        assert_eq!(form.input(), "");
        assert_eq!(form.selected_project().and_then(|p| p.id), Some(2));
    }

    #[test]
    fn caret_is_clamped() {
        let mut form = TaskForm::new(corpus());
        form.set_input("#é", 2);
        assert_eq!(form.caret(), 1);
        form.set_caret(100);
        assert_eq!(form.caret(), 3);
    }
}
