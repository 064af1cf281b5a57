//! Built-in destination catalog

use super::{CatalogError, CatalogSource};
use crate::domain::Destination;

/// Catalog data compiled into the binary
const DESTINATIONS_JSON: &str = include_str!("../../data/destinations.json");

/// The built-in catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

impl CatalogSource for EmbeddedCatalog {
    fn describe(&self) -> String {
        "embedded".to_string()
    }

    fn try_load(&self) -> Result<Vec<Destination>, CatalogError> {
        Ok(serde_json::from_str(DESTINATIONS_JSON)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let destinations = EmbeddedCatalog.try_load().unwrap();
        assert!(!destinations.is_empty());
        assert!(destinations.iter().all(|d| !d.name.is_empty()));
    }

    #[test]
    fn test_embedded_catalog_has_european_low_budget_beach() {
        let destinations = EmbeddedCatalog.try_load().unwrap();
        let found = destinations.iter().any(|d| {
            d.region.as_deref().is_some_and(|r| r.contains("Europe"))
                && d.budget.as_deref() == Some("low")
                && d.tags.iter().any(|t| t == "beach")
        });
        assert!(found);
    }
}
