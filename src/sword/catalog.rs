//! The list of modules to convert, and where their inputs and outputs live.
//!
//! A catalog is read from JSON:
//!
//! ```json
//! {
//!   "source_dir": "data/sword-modules",
//!   "output_dir": "data/commentaries",
//!   "modules": [
//!     { "name": "MHC", "dir": "MHC", "driver": "zCom4" }
//!   ]
//! }
//! ```
//!
//! `dir` is resolved against `source_dir` and defaults to `name`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::types::error::{Result, SwordError};
use super::types::models::ModuleDriver;

/// One module entry of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    pub driver: String,
}

impl ModuleEntry {
    pub fn new(name: &str, driver: ModuleDriver) -> Self {
        Self {
            name: name.to_string(),
            dir: None,
            driver: driver.name().to_string(),
        }
    }

    pub fn driver(&self) -> Result<ModuleDriver> {
        self.driver.parse()
    }

    /// Name of the JSON artifact written for this module.
    pub fn output_file_name(&self) -> String {
        format!("{}.json", self.name.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    pub modules: Vec<ModuleEntry>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("data/sword-modules")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/commentaries")
}

impl Default for Catalog {
    /// The public-domain commentaries distributed as SWORD modules.
    fn default() -> Self {
        use ModuleDriver::{ZCom, ZCom4};
        let modules = [
            ("MHC", ZCom4),
            ("MHCC", ZCom),
            ("Barnes", ZCom),
            ("Clarke", ZCom),
            ("JFB", ZCom4),
            ("Wesley", ZCom),
            ("CalvinCommentaries", ZCom),
            ("RWP", ZCom),
            ("KD", ZCom4),
        ]
        .into_iter()
        .map(|(name, driver)| ModuleEntry::new(name, driver))
        .collect();

        Self {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            modules,
        }
    }
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks drivers and rejects duplicate output names.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for entry in &self.modules {
            if entry.name.trim().is_empty() {
                return Err(SwordError::InvalidCatalog("module with empty name".to_string()));
            }
            entry.driver()?;
            if !seen.insert(entry.output_file_name()) {
                return Err(SwordError::InvalidCatalog(format!(
                    "duplicate module name: {}",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    pub fn module_dir(&self, entry: &ModuleEntry) -> PathBuf {
        self.source_dir
            .join(entry.dir.as_deref().unwrap_or(entry.name.as_str()))
    }

    pub fn output_path(&self, entry: &ModuleEntry) -> PathBuf {
        self.output_dir.join(entry.output_file_name())
    }
}
