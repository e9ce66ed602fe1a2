use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::model::page::PageData;
use crate::ops::candidates::Corpus;

/// Element id the page embeds its task lists under
pub const TASKS_DATA_ID: &str = "tasks-data";

/// Error type for loading page data and corpora
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("no <script id=\"tasks-data\"> element found")]
    MissingDataElement,
    #[error("invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("invalid pattern: {0}")]
    PatternError(#[from] regex::Error),
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Pull the text content of the `tasks-data` script element out of an HTML page
pub fn extract_embedded_json(html: &str) -> Result<&str, LoadError> {
    let re = Regex::new(&format!(
        r#"(?is)<script\b[^>]*\bid\s*=\s*["']{}["'][^>]*>(.*?)</script>"#,
        regex::escape(TASKS_DATA_ID)
    ))?;
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .ok_or(LoadError::MissingDataElement)
}

/// Parse page data from either raw JSON or an HTML page embedding it
pub fn parse_page_source(source: &str) -> Result<PageData, LoadError> {
    let trimmed = source.trim_start();
    let json = if trimmed.starts_with('{') {
        trimmed
    } else {
        extract_embedded_json(source)?
    };
    Ok(serde_json::from_str(json)?)
}

/// Read page data from a `.json` or `.html` file
pub fn read_page_data(path: &Path) -> Result<PageData, LoadError> {
    let text = read_text(path)?;
    parse_page_source(&text)
}

/// Parse a `{"projects": [...], "users": [...]}` corpus document
pub fn parse_corpus(source: &str) -> Result<Corpus, LoadError> {
    Ok(serde_json::from_str(source)?)
}

pub fn read_corpus(path: &Path) -> Result<Corpus, LoadError> {
    let text = read_text(path)?;
    parse_corpus(&text)
}

/// Read a corpus, falling back to an empty one when it cannot be loaded.
/// The autocomplete keeps working, it just has nothing to offer.
pub fn load_corpus_or_empty(path: Option<&Path>) -> Corpus {
    let Some(path) = path else {
        log::warn!("no corpus given; autocomplete has no candidates");
        return Corpus::default();
    };
    match read_corpus(path) {
        Ok(corpus) => {
            log::debug!(
                "loaded {} projects and {} users from {}",
                corpus.projects.len(),
                corpus.users.len(),
                path.display()
            );
            corpus
        }
        Err(e) => {
            log::error!("failed to load corpus: {}", e);
            Corpus::default()
        }
    }
}
