use crate::address_book::DEFAULT_PAGE_SIZE;
use crate::error::Result;
use crate::store::fs::{DEFAULT_CONTACTS_FILE, DEFAULT_NOTES_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";

/// User settings, stored in `<data-dir>/config.json`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookConfig {
    /// Contacts shown per page by `show`
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,

    #[serde(default = "default_notes_file")]
    pub notes_file: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_contacts_file() -> String {
    DEFAULT_CONTACTS_FILE.to_string()
}

fn default_notes_file() -> String {
    DEFAULT_NOTES_FILE.to_string()
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            contacts_file: default_contacts_file(),
            notes_file: default_notes_file(),
        }
    }
}

impl BookConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: BookConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Page size clamped to at least one contact per page.
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }
}
