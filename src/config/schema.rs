use serde::{Deserialize, Serialize};

/// Settings of the command-line front end. Scoring parameters live in the data store.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Data file path (defaults to the platform data directory)
    #[serde(default)]
    pub data_file: Option<String>,

    /// Ranking year override; the system clock is used when unset
    #[serde(default)]
    pub current_year: Option<i32>,

    /// Rows shown by `list` when no --limit is given
    #[serde(default)]
    pub page_size: Option<usize>,
}
