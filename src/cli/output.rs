use serde::Serialize;

use crate::form::autocomplete::AutocompleteState;
use crate::model::project::ProjectRecord;
use crate::model::task::TaskRecord;
use crate::ops::candidates::Candidate;
use crate::ops::task_list::{ProjectGroup, TaskList};
use crate::parse::description::{TagRef, strip_tags};
use crate::parse::tag::Tag;
use crate::util::dates::format_date_with;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskListJson<'a> {
    pub list: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<&'a str>,
    pub tasks: &'a [TaskRecord],
}

#[derive(Serialize)]
pub struct GroupedJson<'a> {
    pub list: String,
    pub groups: &'a [ProjectGroup],
}

#[derive(Serialize)]
pub struct CompletionJson<'a> {
    pub tag: Option<&'a Tag>,
    pub candidates: &'a [Candidate],
}

pub fn task_list_json(list: &TaskList) -> TaskListJson<'_> {
    let search = list.search_query();
    TaskListJson {
        list: list.list_type().to_string(),
        search: (!search.is_empty()).then_some(search),
        tasks: list.filtered(),
    }
}

pub fn completion_json(ac: &AutocompleteState) -> CompletionJson<'_> {
    CompletionJson {
        tag: ac.tag(),
        candidates: ac.candidates(),
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `[*] #12 Align laser  (Laser Rig, Ann Lee, Dec 1, 2024)`
pub fn format_task_line(task: &TaskRecord, date_format: &str) -> String {
    let marker = if task.is_complete {
        'x'
    } else if task.is_flagged {
        '*'
    } else {
        ' '
    };

    let date = format_date_with(task.created_at.as_deref(), date_format);
    let details: Vec<&str> = [
        task.project_name.as_deref(),
        task.assigned_to_name.as_deref(),
        (!date.is_empty()).then_some(date.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut line = format!("[{}] #{} {}", marker, task.id, strip_tags(&task.description));
    if !details.is_empty() {
        line.push_str(&format!("  ({})", details.join(", ")));
    }
    line
}

pub fn format_group_header(group: &ProjectGroup) -> String {
    if group.client_name.is_empty() {
        group.name.clone()
    } else {
        format!("{} ({})", group.name, group.client_name)
    }
}

/// Completion summary: the tag, then one candidate per line
pub fn format_completion(ac: &AutocompleteState) -> String {
    let Some(tag) = ac.tag() else {
        return "no active tag".to_string();
    };
    let mut lines = vec![format!(
        "{} tag {:?} at {}..{}",
        tag.kind.label(),
        tag.query,
        tag.start(),
        tag.end()
    )];
    if ac.candidates().is_empty() {
        lines.push("  (no matches)".to_string());
    }
    for c in ac.candidates() {
        lines.push(format!("  {} ({})", c.name, c.id));
    }
    lines.join("\n")
}

pub fn format_tag_ref(tag: &TagRef) -> String {
    format!(
        "{:<8} {:<24} {}..{}",
        tag.kind.label(),
        tag.name,
        tag.span.start,
        tag.span.end
    )
}

pub fn format_project(project: &ProjectRecord) -> String {
    format!("{:>4}  {}", project.id, project.display_name())
}
