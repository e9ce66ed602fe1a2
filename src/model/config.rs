use serde::{Deserialize, Serialize};

use super::page::ListType;

/// Configuration from hubtrack.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub autocomplete: AutocompleteConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub lists: ListConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteConfig {
    /// Maximum number of candidates shown in the dropdown
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        AutocompleteConfig {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    crate::ops::candidates::MAX_CANDIDATES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for task dates
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            date_format: default_date_format(),
        }
    }
}

fn default_date_format() -> String {
    crate::util::dates::DEFAULT_DATE_FORMAT.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_list")]
    pub default: ListType,
}

impl Default for ListConfig {
    fn default() -> Self {
        ListConfig {
            default: default_list(),
        }
    }
}

fn default_list() -> ListType {
    ListType::AllTasks
}
