use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::task::TaskRecord;

/// Which of the embedded lists a task list shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListType {
    TasksForMe,
    AllTasks,
    CompletedTasks,
    TasksICreated,
}

impl ListType {
    pub fn key(self) -> &'static str {
        match self {
            ListType::TasksForMe => "tasks-for-me",
            ListType::AllTasks => "all-tasks",
            ListType::CompletedTasks => "completed-tasks",
            ListType::TasksICreated => "tasks-i-created",
        }
    }

    /// Completed lists keep the server's order; every other list is sorted
    /// flagged-first, newest-first.
    pub fn sorts_by_priority(self) -> bool {
        self != ListType::CompletedTasks
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ListType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tasks-for-me" => Ok(ListType::TasksForMe),
            "all-tasks" => Ok(ListType::AllTasks),
            "completed-tasks" => Ok(ListType::CompletedTasks),
            "tasks-i-created" => Ok(ListType::TasksICreated),
            other => Err(format!("unknown list type: {}", other)),
        }
    }
}

/// The JSON blob a page embeds under `<script id="tasks-data">`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    #[serde(default)]
    pub current_user_id: Option<i64>,
    #[serde(default)]
    pub tasks_for_me: Vec<TaskRecord>,
    #[serde(default)]
    pub all_tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub completed_tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub tasks_i_created: Vec<TaskRecord>,
}

impl PageData {
    /// The embedded list backing the given list type
    pub fn list(&self, list_type: ListType) -> &[TaskRecord] {
        match list_type {
            ListType::TasksForMe => &self.tasks_for_me,
            ListType::AllTasks => &self.all_tasks,
            ListType::CompletedTasks => &self.completed_tasks,
            ListType::TasksICreated => &self.tasks_i_created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_default_to_empty() {
        let page: PageData = serde_json::from_str(r#"{"currentUserId": 3}"#).unwrap();
        assert_eq!(page.current_user_id, Some(3));
        assert!(page.tasks_for_me.is_empty());
        assert!(page.completed_tasks.is_empty());
    }

    #[test]
    fn list_type_keys() {
        for lt in [
            ListType::TasksForMe,
            ListType::AllTasks,
            ListType::CompletedTasks,
            ListType::TasksICreated,
        ] {
            assert_eq!(lt.key().parse::<ListType>(), Ok(lt));
        }
        assert!("my-tasks".parse::<ListType>().is_err());
    }

    #[test]
    fn task_optional_fields() {
        let page: PageData = serde_json::from_str(
            r#"{"allTasks": [
                {"id": 1, "description": "Calibrate scope", "is_flagged": true,
                 "project_name": "Optics", "assigned_to": 4}
            ]}"#,
        )
        .unwrap();
        let task = &page.all_tasks[0];
        assert!(task.is_flagged);
        assert_eq!(task.project_name.as_deref(), Some("Optics"));
        assert_eq!(task.assigned_to_id, Some(4));
        assert_eq!(task.client_name, None);
    }
}
