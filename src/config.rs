//! Folder paths and naming templates consumed by the catalog. Loading is
//! best-effort: a missing or malformed config file falls back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub data_folder: PathBuf,
    pub reports_folder: PathBuf,
    pub temp_folder: PathBuf,
    pub delimiter: char,
    pub reviews_file: String,
    pub report_file: String,
    pub snapshot_file: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            data_folder: PathBuf::from("data"),
            reports_folder: PathBuf::from("reports"),
            temp_folder: PathBuf::from("tmp"),
            delimiter: ',',
            reviews_file: "reviews{id}.txt".to_string(),
            report_file: "product{id}_report_{client}.txt".to_string(),
            snapshot_file: "catalog{stamp}.tmp".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Read a JSON config file; any failure is logged and yields defaults.
    pub fn from_file(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    "config {} unreadable, using defaults: {}",
                    path.display(),
                    err
                );
                return Self::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "config {} malformed, using defaults: {}",
                    path.display(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn reviews_path(&self, id: u32) -> PathBuf {
        self.data_folder
            .join(fill(&self.reviews_file, &[("id", &id.to_string())]))
    }

    pub fn report_path(&self, id: u32, client: &str) -> PathBuf {
        self.reports_folder.join(fill(
            &self.report_file,
            &[("id", &id.to_string()), ("client", client)],
        ))
    }

    pub fn snapshot_path(&self, stamp: &str) -> PathBuf {
        self.temp_folder
            .join(fill(&self.snapshot_file, &[("stamp", stamp)]))
    }

    /// File-name prefix and suffix around the `{stamp}` placeholder, used to
    /// recognize snapshot files when restoring.
    pub(crate) fn snapshot_pattern(&self) -> Option<(&str, &str)> {
        self.snapshot_file.split_once("{stamp}")
    }
}

/// Replace each `{key}` placeholder with its value.
pub(crate) fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}
