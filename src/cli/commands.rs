use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::page::ListType;

#[derive(Parser)]
#[command(name = "ht", about = concat!("hubtrack v", env!("CARGO_PKG_VERSION"), " - task lists and tag autocomplete"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./hubtrack.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a task list from page data
    List(ListArgs),
    /// Locate the tag at the caret and list matching candidates
    Complete(CompleteArgs),
    /// Commit a candidate into the tag at the caret
    Pick(PickArgs),
    /// List the tags in a task description
    Tags(TagsArgs),
    /// Filter projects by name, client, or display name
    Projects(ProjectsArgs),
    /// Open the interactive task-entry form
    New(NewArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Page data: raw JSON or an HTML page with a tasks-data script element
    #[arg(long)]
    pub page: PathBuf,
    /// Which list to show (tasks-for-me, all-tasks, completed-tasks, tasks-i-created)
    #[arg(long)]
    pub list: Option<ListType>,
    /// Filter by text in description, project, client, assignee, or creator
    #[arg(long)]
    pub search: Option<String>,
    /// Group tasks under their project
    #[arg(long)]
    pub by_project: bool,
}

#[derive(Args)]
pub struct CompleteArgs {
    /// Projects/users JSON ({"projects": [...], "users": [...]})
    #[arg(long)]
    pub corpus: Option<PathBuf>,
    /// Caret byte offset (default: end of text)
    #[arg(long)]
    pub caret: Option<usize>,
    /// The text being typed
    pub text: String,
}

#[derive(Args)]
pub struct PickArgs {
    /// Projects/users JSON ({"projects": [...], "users": [...]})
    #[arg(long)]
    pub corpus: Option<PathBuf>,
    /// Caret byte offset (default: end of text)
    #[arg(long)]
    pub caret: Option<usize>,
    /// Position of the candidate in the completion list
    #[arg(long, default_value_t = 0)]
    pub index: usize,
    /// The text being typed
    pub text: String,
}

#[derive(Args)]
pub struct TagsArgs {
    /// Task description
    pub text: String,
    /// Print the description with bracketed tags flattened
    #[arg(long)]
    pub strip: bool,
}

#[derive(Args)]
pub struct ProjectsArgs {
    /// Projects/users JSON ({"projects": [...], "users": [...]})
    #[arg(long)]
    pub corpus: Option<PathBuf>,
    /// Search text (default: all projects)
    pub query: Option<String>,
}

#[derive(Args)]
pub struct NewArgs {
    /// Projects/users JSON ({"projects": [...], "users": [...]})
    #[arg(long)]
    pub corpus: Option<PathBuf>,
    /// Preselect a project by name
    #[arg(long)]
    pub project: Option<String>,
}
