use std::sync::mpsc;

use serde::Serialize;

use crate::model::task::TaskRecord;

/// What a host should open the task editor for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum EditorRequest {
    /// Blank form, optionally preset to a project by name
    New { default_project: Option<String> },
    /// Edit an existing task
    Edit { task: TaskRecord },
}

impl EditorRequest {
    /// The form commands that put a form into the state this request asks for
    pub fn into_commands(self) -> Vec<FormCommand> {
        match self {
            EditorRequest::New { default_project } => default_project
                .map(|name| FormCommand::PresetProject {
                    id: None,
                    name,
                    lookup_by_name: true,
                })
                .into_iter()
                .collect(),
            EditorRequest::Edit { task } => vec![FormCommand::EditTask {
                task_id: task.id,
                description: task.description,
                project_id: task.project_id,
                project_name: task.project_name,
                user_id: task.assigned_to_id,
                user_name: task.assigned_to_name,
            }],
        }
    }
}

/// Signals list components send to their host page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HostSignal {
    OpenTaskEditor(EditorRequest),
}

/// Messages a host sends to a task form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    /// Preselect a project by id, or by name when `lookup_by_name` is set
    PresetProject {
        id: Option<i64>,
        name: String,
        lookup_by_name: bool,
    },
    /// Preselect an assignee by id
    PresetUser { id: Option<i64>, name: String },
    /// Load an existing task into the form
    EditTask {
        task_id: i64,
        description: String,
        project_id: Option<i64>,
        project_name: Option<String>,
        user_id: Option<i64>,
        user_name: Option<String>,
    },
}

pub type SignalSender = mpsc::Sender<HostSignal>;
pub type SignalReceiver = mpsc::Receiver<HostSignal>;

/// Create a host signal channel
pub fn channel() -> (SignalSender, SignalReceiver) {
    mpsc::channel()
}
