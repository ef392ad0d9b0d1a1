use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collation::TitleOrder;
use crate::selection::InitialExpansion;

const DEFAULT_INDENT_WIDTH: usize = 2;

/// Errors emitted while reading picker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("picker config IO failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("picker config JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunables for tree building, session setup and text rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct PickerConfig {
    pub title_order: TitleOrder,
    pub initial_expansion: InitialExpansion,
    pub indent_width: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            title_order: TitleOrder::default(),
            initial_expansion: InitialExpansion::default(),
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl PickerConfig {
    /// Read configuration from a JSON file; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            },
            Err(err) => return Err(err.into()),
        };

        Self::from_json_str(&data)
    }

    /// Parse a config document, filling missing fields with defaults.
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }
}
