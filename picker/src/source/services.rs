use std::fs;
use std::path::{Path, PathBuf};

use super::errors::SourceError;
use super::model::parse_response;
use crate::model::SelectorData;

/// Message reported when the backend cannot serve the payload.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load item selector data";

/// Provider of a complete selector dataset.
pub trait DataSource {
    fn fetch(&self) -> Result<SelectorData, SourceError>;
}

/// Reads the columnar JSON payload from a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading `path` on every fetch.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Return the payload file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<SelectorData, SourceError> {
        let payload = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let path_display = self.path.display();
                log::warn!("selector payload missing at {path_display}");
                return Err(SourceError::Unavailable {
                    message: String::from(LOAD_FAILED_MESSAGE),
                });
            },
            Err(err) => return Err(err.into()),
        };

        parse_response(&payload)
    }
}

/// Serves a fixed dataset or a fixed failure.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: Result<SelectorData, String>,
}

impl StaticSource {
    /// Create a source serving `data`.
    pub fn new(data: SelectorData) -> Self {
        Self { payload: Ok(data) }
    }

    /// Create a source that always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            payload: Err(message.into()),
        }
    }
}

impl DataSource for StaticSource {
    fn fetch(&self) -> Result<SelectorData, SourceError> {
        self.payload
            .clone()
            .map_err(|message| SourceError::Unavailable { message })
    }
}
