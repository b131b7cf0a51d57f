//! Path guard sandbox configuration.

use serde::{Deserialize, Serialize};

/// Location and limits of the directory untrusted filenames resolve into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxConfig {
    /// Base directory. Created on startup if absent.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    /// Longest accepted filename in bytes.
    #[serde(default = "default_max_path_length")]
    pub max_path_length: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            max_path_length: default_max_path_length(),
        }
    }
}

fn default_base_dir() -> String {
    "./data/safe_files".to_string()
}

fn default_max_path_length() -> usize {
    255
}
