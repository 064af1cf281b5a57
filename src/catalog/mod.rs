//! Destination catalog
//!
//! The catalog is read-only reference data. It is loaded once, shared between
//! pipeline runs behind an `Arc`, and never mutated afterwards.
//!
//! Sources:
//! 1. `JsonFileCatalog` - a user-supplied JSON array of destinations
//! 2. `EmbeddedCatalog` - the built-in catalog compiled into the binary

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::domain::Destination;

mod embedded;
mod error;
mod file;

pub use embedded::EmbeddedCatalog;
pub use error::CatalogError;
pub use file::JsonFileCatalog;

/// Shared immutable catalog
pub type Catalog = Arc<[Destination]>;

/// Something that can produce the destination catalog
pub trait CatalogSource: Send + Sync {
    /// Short description for logs (e.g. a file path)
    fn describe(&self) -> String;

    /// Load the catalog, reporting why it could not be read
    fn try_load(&self) -> Result<Vec<Destination>, CatalogError>;

    /// Load the catalog; an unavailable source yields an empty catalog
    fn load_catalog(&self) -> Vec<Destination> {
        match self.try_load() {
            Ok(destinations) => {
                debug!(source = %self.describe(), count = destinations.len(), "load_catalog: loaded");
                destinations
            }
            Err(e) => {
                warn!(source = %self.describe(), error = %e, "load_catalog: source unavailable, using empty catalog");
                Vec::new()
            }
        }
    }
}

/// Pick the catalog source named by config
pub fn source_from_config(config: &CatalogConfig) -> Box<dyn CatalogSource> {
    debug!(?config, "source_from_config: called");
    match &config.path {
        Some(path) => Box::new(JsonFileCatalog::new(path)),
        None => Box::new(EmbeddedCatalog),
    }
}

/// Load a source once into the shared form
pub fn load(source: &dyn CatalogSource) -> Catalog {
    let destinations = source.load_catalog();
    info!(source = %source.describe(), count = destinations.len(), "Catalog loaded");
    Arc::from(destinations)
}
