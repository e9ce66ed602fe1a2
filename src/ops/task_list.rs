use std::cmp::Reverse;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::form::signals::{EditorRequest, HostSignal, SignalSender};
use crate::io::page_io;
use crate::model::page::{ListType, PageData};
use crate::model::task::TaskRecord;
use crate::util::dates::parse_timestamp;

/// Group name for tasks without a project
pub const NO_PROJECT: &str = "No Project";

/// Sort tasks flagged-first, then newest-first.
///
/// Tasks whose timestamp is missing or unparseable sort after dated ones
/// within their flag group. Equal keys keep their original order.
pub fn sort_by_priority(tasks: &mut [TaskRecord]) {
    tasks.sort_by_cached_key(|t| {
        (
            Reverse(t.is_flagged),
            Reverse(t.created_at.as_deref().and_then(parse_timestamp)),
        )
    });
}

/// Whether `task` matches a lowercased search needle
fn task_matches(task: &TaskRecord, needle: &str) -> bool {
    task.searchable_fields()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Identity of a project group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupId {
    Project(i64),
    NoProject,
}

impl Serialize for GroupId {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupId::Project(id) => s.serialize_i64(*id),
            GroupId::NoProject => s.serialize_str("no-project"),
        }
    }
}

/// Tasks sharing a project name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectGroup {
    pub id: GroupId,
    pub name: String,
    pub client_name: String,
    pub tasks: Vec<TaskRecord>,
}

impl ProjectGroup {
    pub fn is_no_project(&self) -> bool {
        self.name == NO_PROJECT
    }
}

/// One of the page's task lists: the hydrated tasks, the current search, and
/// the filtered view derived from them.
#[derive(Debug)]
pub struct TaskList {
    list_type: ListType,
    tasks: Vec<TaskRecord>,
    filtered: Vec<TaskRecord>,
    search_query: String,
    show_completed: bool,
    show_tasks_i_created: bool,
    current_user_id: Option<i64>,
    initialized: bool,
    signals: Option<SignalSender>,
}

impl TaskList {
    /// A list that failed to hydrate. Every operation on it is a no-op.
    pub fn uninitialized(list_type: ListType) -> Self {
        TaskList {
            list_type,
            tasks: Vec::new(),
            filtered: Vec::new(),
            search_query: String::new(),
            show_completed: false,
            show_tasks_i_created: false,
            current_user_id: None,
            initialized: false,
            signals: None,
        }
    }

    /// Hydrate from already-parsed page data
    pub fn from_page(page: &PageData, list_type: ListType) -> Self {
        let mut list = TaskList::uninitialized(list_type);
        list.current_user_id = page.current_user_id;
        list.tasks = page.list(list_type).to_vec();
        list.filtered = list.ordered(list.tasks.clone());
        list.initialized = true;
        log::debug!(
            "task list {} initialized with {} tasks",
            list_type,
            list.tasks.len()
        );
        list
    }

    /// Hydrate from the page source (raw JSON or HTML with an embedded
    /// `tasks-data` element). Failures are logged and give an empty,
    /// uninitialized list.
    pub fn hydrate(source: &str, list_type: ListType) -> Self {
        match page_io::parse_page_source(source) {
            Ok(page) => TaskList::from_page(&page, list_type),
            Err(e) => {
                log::error!("error initializing task list {}: {}", list_type, e);
                TaskList::uninitialized(list_type)
            }
        }
    }

    /// Route editor requests to a host
    pub fn connect(&mut self, signals: SignalSender) {
        self.signals = Some(signals);
    }

    pub fn list_type(&self) -> ListType {
        self.list_type
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.current_user_id
    }

    /// All hydrated tasks in page order
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// The tasks currently shown
    pub fn filtered(&self) -> &[TaskRecord] {
        &self.filtered
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn show_completed(&self) -> bool {
        self.show_completed
    }

    pub fn show_tasks_i_created(&self) -> bool {
        self.show_tasks_i_created
    }

    fn ordered(&self, mut tasks: Vec<TaskRecord>) -> Vec<TaskRecord> {
        if self.list_type.sorts_by_priority() {
            sort_by_priority(&mut tasks);
        }
        tasks
    }

    /// Set the search text and refilter
    pub fn set_search(&mut self, query: &str) {
        if !self.initialized {
            return;
        }
        self.search_query = query.to_string();
        self.filter_tasks();
    }

    /// Recompute the filtered view from the current search text
    pub fn filter_tasks(&mut self) {
        if !self.initialized {
            return;
        }
        let query = self.search_query.trim();
        let matched: Vec<TaskRecord> = if query.is_empty() {
            self.tasks.clone()
        } else {
            let needle = self.search_query.to_lowercase();
            self.tasks
                .iter()
                .filter(|t| task_matches(t, &needle))
                .cloned()
                .collect()
        };
        self.filtered = self.ordered(matched);
    }

    pub fn clear_search(&mut self) {
        if !self.initialized {
            return;
        }
        self.search_query.clear();
        self.filtered = self.ordered(self.tasks.clone());
    }

    /// Group the filtered tasks by project name, in order of first appearance.
    /// Each group's tasks are sorted by priority.
    pub fn group_by_project(&self) -> Vec<ProjectGroup> {
        if !self.initialized {
            return Vec::new();
        }
        let mut groups: IndexMap<String, ProjectGroup> = IndexMap::new();
        for task in &self.filtered {
            let name = task
                .project_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(NO_PROJECT);
            let group = groups
                .entry(name.to_string())
                .or_insert_with(|| ProjectGroup {
                    id: task.project_id.map_or(GroupId::NoProject, GroupId::Project),
                    name: name.to_string(),
                    client_name: task.client_name.clone().unwrap_or_default(),
                    tasks: Vec::new(),
                });
            group.tasks.push(task.clone());
        }

        groups
            .into_values()
            .map(|mut g| {
                sort_by_priority(&mut g.tasks);
                g
            })
            .collect()
    }

    pub fn toggle_completed(&mut self) {
        if self.initialized {
            self.show_completed = !self.show_completed;
        }
    }

    pub fn toggle_tasks_i_created(&mut self) {
        if self.initialized {
            self.show_tasks_i_created = !self.show_tasks_i_created;
        }
    }

    /// Ask the host to open a new-task editor preset to the group's project
    pub fn add_task_to_project(&self, group: &ProjectGroup) {
        if !self.initialized {
            return;
        }
        let default_project = (!group.is_no_project()).then(|| group.name.clone());
        self.emit(HostSignal::OpenTaskEditor(EditorRequest::New {
            default_project,
        }));
    }

    /// Ask the host to open the editor on an existing task
    pub fn edit_task(&self, task: &TaskRecord) {
        if !self.initialized {
            return;
        }
        self.emit(HostSignal::OpenTaskEditor(EditorRequest::Edit {
            task: task.clone(),
        }));
    }

    fn emit(&self, signal: HostSignal) {
        match &self.signals {
            Some(tx) => {
                if tx.send(signal).is_err() {
                    log::warn!("task list {}: host is no longer listening", self.list_type);
                }
            }
            None => log::warn!("task list {}: no host connected", self.list_type),
        }
    }
}
