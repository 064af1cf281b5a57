//! JSON file catalog

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{CatalogError, CatalogSource};
use crate::domain::Destination;

/// Catalog read from a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for JsonFileCatalog {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn try_load(&self) -> Result<Vec<Destination>, CatalogError> {
        debug!(path = %self.path.display(), "JsonFileCatalog::try_load: called");
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
