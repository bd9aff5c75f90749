use super::DataSource;
use crate::error::{PlazaError, Result};
use std::fs;
use std::path::PathBuf;

/// Production source: a JSON fixture file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for FileSource {
    fn fetch(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .map_err(|e| PlazaError::Load(format!("{}: {}", self.path.display(), e)))
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }
}
