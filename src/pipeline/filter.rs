//! Destination filtering
//!
//! Narrows the catalog to destinations whose attributes agree with every
//! active preference that has a comparable attribute. All comparisons are
//! case-insensitive; a destination missing the compared attribute fails.

use async_trait::async_trait;
use tracing::{debug, info};

use super::Stage;
use crate::catalog::Catalog;
use crate::domain::{ConversationState, Destination, Preferences};

/// `wanted` is a substring of the destination region
fn region_matches(wanted: &str, dest: &Destination) -> bool {
    dest.region
        .as_deref()
        .is_some_and(|region| region.to_lowercase().contains(&wanted.to_lowercase()))
}

/// `wanted` is one of the destination tags
fn tag_matches(wanted: &str, dest: &Destination) -> bool {
    let wanted = wanted.to_lowercase();
    dest.tags.iter().any(|tag| tag.to_lowercase() == wanted)
}

/// `wanted` equals the attribute
fn attribute_equals(wanted: &str, attribute: Option<&str>) -> bool {
    attribute.is_some_and(|value| value.to_lowercase() == wanted.to_lowercase())
}

/// Check one destination against every comparable preference
pub fn matches(dest: &Destination, prefs: &Preferences) -> bool {
    let region_ok = [prefs.preferred_city.as_deref(), prefs.region.as_deref()]
        .into_iter()
        .flatten()
        .all(|wanted| region_matches(wanted, dest));

    let style_ok = [prefs.travel_style.as_deref(), prefs.interest.as_deref()]
        .into_iter()
        .flatten()
        .all(|wanted| tag_matches(wanted, dest));

    let budget_ok = prefs
        .budget
        .as_deref()
        .is_none_or(|wanted| attribute_equals(wanted, dest.budget.as_deref()));

    let travel_type_ok = prefs
        .travel_type
        .as_deref()
        .is_none_or(|wanted| attribute_equals(wanted, dest.travel_type.as_deref()));

    region_ok && style_ok && budget_ok && travel_type_ok
}

/// Ordered subsequence of `catalog` matching `prefs`
pub fn filter_destinations(prefs: &Preferences, catalog: &[Destination]) -> Vec<Destination> {
    debug!(catalog_size = catalog.len(), "filter_destinations: called");
    catalog.iter().filter(|dest| matches(dest, prefs)).cloned().collect()
}

/// Stage that replaces the suggestions with the filtered catalog
pub struct DestinationFilter {
    catalog: Catalog,
}

impl DestinationFilter {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Stage for DestinationFilter {
    fn name(&self) -> &'static str {
        "find_destinations"
    }

    async fn apply(&self, state: &mut ConversationState) {
        state.suggested_destinations = filter_destinations(&state.preferences, &self.catalog);
        info!(
            matches = state.suggested_destinations.len(),
            catalog_size = self.catalog.len(),
            "Filtered destinations"
        );
    }
}
