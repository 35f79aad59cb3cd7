use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATABASE_PATH: &str = "database.json";
pub const DATABASE_PATH_ENV: &str = "LCM_DATABASE_PATH";
pub const ATOMIC_WRITES_ENV: &str = "LCM_ATOMIC_WRITES";

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}


// Configuration abstracts config options for the catalog
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub database_path: PathBuf,
    // write to a sibling temp file and rename it over the document
    pub atomic_writes: bool,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            atomic_writes: true,
        }
    }

    pub fn from_env(branch_id: &str) -> Self {
        let mut config = Configuration::new(branch_id);
        if let Ok(path) = std::env::var(DATABASE_PATH_ENV) {
            if !path.trim().is_empty() {
                config.database_path = PathBuf::from(path);
            }
        }
        if let Ok(flag) = std::env::var(ATOMIC_WRITES_ENV) {
            config.atomic_writes = !matches!(flag.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off");
        }
        config
    }

    pub fn with_database_path(mut self, path: impl AsRef<Path>) -> Self {
        self.database_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }
}
