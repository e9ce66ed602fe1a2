use crate::cli::commands::*;
use crate::cli::output::*;
use crate::form::task_form::TaskForm;
use crate::io::{config_io, page_io};
use crate::model::config::Config;
use crate::ops::project_picker::ProjectPicker;
use crate::ops::task_list::TaskList;
use crate::parse::description::{extract_tags, strip_tags};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let config = config_io::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::List(args) => cmd_list(args, &config, json),
        Commands::Complete(args) => cmd_complete(args, &config, json),
        Commands::Pick(args) => cmd_pick(args, &config, json),
        Commands::Tags(args) => cmd_tags(args, json),
        Commands::Projects(args) => cmd_projects(args, json),
        Commands::New(args) => cmd_new(args, &config),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A form loaded with the corpus and positioned at the caret
fn form_at(
    corpus: Option<&std::path::Path>,
    config: &Config,
    text: &str,
    caret: Option<usize>,
) -> TaskForm {
    let mut form = TaskForm::new(page_io::load_corpus_or_empty(corpus));
    form.set_max_results(config.autocomplete.max_results);
    form.set_input(text, caret.unwrap_or(text.len()));
    form
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(args: ListArgs, config: &Config, json: bool) -> CmdResult {
    let page = page_io::read_page_data(&args.page)?;
    let list_type = args.list.unwrap_or(config.lists.default);

    let mut list = TaskList::from_page(&page, list_type);
    if let Some(query) = &args.search {
        list.set_search(query);
    }

    if args.by_project {
        let groups = list.group_by_project();
        if json {
            return print_json(&GroupedJson {
                list: list_type.to_string(),
                groups: &groups,
            });
        }
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", format_group_header(group));
            for task in &group.tasks {
                println!("  {}", format_task_line(task, &config.display.date_format));
            }
        }
        return Ok(());
    }

    if json {
        return print_json(&task_list_json(&list));
    }
    if list.filtered().is_empty() {
        println!("no tasks");
    }
    for task in list.filtered() {
        println!("{}", format_task_line(task, &config.display.date_format));
    }
    Ok(())
}

fn cmd_complete(args: CompleteArgs, config: &Config, json: bool) -> CmdResult {
    let form = form_at(args.corpus.as_deref(), config, &args.text, args.caret);
    if json {
        return print_json(&completion_json(form.autocomplete()));
    }
    println!("{}", format_completion(form.autocomplete()));
    Ok(())
}

fn cmd_pick(args: PickArgs, config: &Config, json: bool) -> CmdResult {
    let mut form = form_at(args.corpus.as_deref(), config, &args.text, args.caret);
    if !form.autocomplete().is_active() {
        return Err("no active tag at the caret".into());
    }
    let candidate = form
        .autocomplete()
        .candidates()
        .get(args.index)
        .cloned()
        .ok_or_else(|| format!("no candidate at index {}", args.index))?;

    let commit = form
        .commit(&candidate)
        .ok_or("no active tag at the caret")?;
    if json {
        return print_json(&commit);
    }
    println!("{}", commit.buffer);
    Ok(())
}

fn cmd_tags(args: TagsArgs, json: bool) -> CmdResult {
    if args.strip {
        println!("{}", strip_tags(&args.text));
        return Ok(());
    }
    let tags = extract_tags(&args.text);
    if json {
        return print_json(&tags);
    }
    for tag in &tags {
        println!("{}", format_tag_ref(tag));
    }
    Ok(())
}

fn cmd_projects(args: ProjectsArgs, json: bool) -> CmdResult {
    let corpus = page_io::load_corpus_or_empty(args.corpus.as_deref());
    let mut picker = ProjectPicker::new(corpus.projects);
    if let Some(query) = &args.query {
        picker.set_query(query);
    }
    if json {
        return print_json(&picker.filtered());
    }
    for project in picker.filtered() {
        println!("{}", format_project(project));
    }
    Ok(())
}

fn cmd_new(args: NewArgs, config: &Config) -> CmdResult {
    let corpus = page_io::load_corpus_or_empty(args.corpus.as_deref());
    let mut form = TaskForm::new(corpus);
    form.set_max_results(config.autocomplete.max_results);
    if let Some(name) = args.project {
        form.open(crate::form::signals::EditorRequest::New {
            default_project: Some(name),
        });
    }

    match crate::tui::run(form)? {
        Some(submission) => print_json(&submission),
        None => {
            eprintln!("cancelled");
            Ok(())
        }
    }
}
