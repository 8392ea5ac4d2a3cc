//! Configuration Module
//! Optional JSON file plus environment overrides, with built-in defaults.

use log::warn;
use serde::Deserialize;
use std::path::PathBuf;

/// Optional config file read from the working directory.
const CONFIG_FILE: &str = "logidash.json";

/// Kaggle download endpoint for the public Olist dataset. Individual files
/// are served as zip archives holding the CSV.
const DEFAULT_BASE_URL: &str =
    "https://www.kaggle.com/api/v1/datasets/download/olistbr/brazilian-ecommerce";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the olist_*_dataset.csv files.
    pub data_dir: PathBuf,
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Base URL the dataset files are fetched from.
    pub base_url: String,
    /// Where the static dashboard image is written.
    pub dashboard_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            db_path: PathBuf::from("logistics.db"),
            base_url: DEFAULT_BASE_URL.to_string(),
            dashboard_path: PathBuf::from("dashboard.png"),
        }
    }
}

impl Config {
    /// Load configuration: `logidash.json` if present, then environment
    /// overrides. A malformed file is warned about and ignored.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("ignoring malformed {CONFIG_FILE}: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config
    }

    /// Apply `LOGIDASH_*` overrides from `lookup`, which stands in for the
    /// process environment.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("LOGIDASH_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("LOGIDASH_DB_PATH") {
            self.db_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("LOGIDASH_BASE_URL") {
            self.base_url = url;
        }
    }
}
