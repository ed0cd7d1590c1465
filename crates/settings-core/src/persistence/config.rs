//! Static configuration of a persistence controller.

use serde::{Deserialize, Serialize};

use crate::domain::document::MAX_FILE_SIZE;

/// Where a settings file lives and how large it may grow.
///
/// Both values are fixed for the lifetime of the controller built from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Device path of the settings file, e.g. `"/config/mqttSettings.json"`.
    pub file_path: String,
    /// Capacity of the settings document in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: usize,
}

fn default_max_file_size() -> usize {
    MAX_FILE_SIZE
}

impl PersistenceConfig {
    /// Creates a config for `file_path` with the default capacity.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            max_file_size: MAX_FILE_SIZE,
        }
    }

    /// Overrides the document capacity.
    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}
