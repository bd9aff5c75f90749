use super::DataSource;
use crate::error::{PlazaError, Result};

/// Fixed-payload source. Backs the compiled-in fallback dataset and keeps
/// unit tests off the filesystem.
pub struct StaticSource {
    origin: String,
    payload: String,
}

impl StaticSource {
    pub fn new(origin: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            payload: payload.into(),
        }
    }
}

impl DataSource for StaticSource {
    fn fetch(&self) -> Result<String> {
        Ok(self.payload.clone())
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }
}

/// Source that always fails, simulating an unreachable origin.
pub struct FailingSource {
    origin: String,
}

impl FailingSource {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }
}

impl DataSource for FailingSource {
    fn fetch(&self) -> Result<String> {
        Err(PlazaError::Load(format!("{}: unreachable", self.origin)))
    }

    fn origin(&self) -> String {
        self.origin.clone()
    }
}
