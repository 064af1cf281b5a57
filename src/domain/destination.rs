//! Destination reference data

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A candidate destination from the catalog
///
/// Immutable once loaded. Attributes other than `name` may be missing from
/// catalog data; a missing attribute never matches an active filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Descriptive tags (e.g. "beach", "culture"), in catalog order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Budget tier ("low", "medium", "high")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    /// Travel-type label ("solo", "couple", "family", "friends")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Destination {
    /// Create a destination with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: None,
            tags: Vec::new(),
            budget: None,
            travel_type: None,
            coordinates: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_budget(mut self, budget: impl Into<String>) -> Self {
        self.budget = Some(budget.into());
        self
    }

    pub fn with_travel_type(mut self, travel_type: impl Into<String>) -> Self {
        self.travel_type = Some(travel_type.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates { latitude, longitude });
        self
    }

    /// "Name (Region)" or just "Name" when the region is unknown
    pub fn label(&self) -> String {
        match &self.region {
            Some(region) => format!("{} ({})", self.name, region),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_attributes() {
        let json = r#"{"name": "Somewhere"}"#;
        let dest: Destination = serde_json::from_str(json).unwrap();

        assert_eq!(dest.name, "Somewhere");
        assert!(dest.region.is_none());
        assert!(dest.tags.is_empty());
        assert!(dest.budget.is_none());
        assert!(dest.coordinates.is_none());
    }

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "name": "Algarve",
            "region": "Portugal, Europe",
            "tags": ["beach", "relaxation"],
            "budget": "low",
            "travel_type": "couple",
            "coordinates": {"latitude": 37.02, "longitude": -7.93}
        }"#;
        let dest: Destination = serde_json::from_str(json).unwrap();

        assert_eq!(dest.region.as_deref(), Some("Portugal, Europe"));
        assert_eq!(dest.tags, vec!["beach", "relaxation"]);
        assert_eq!(dest.travel_type.as_deref(), Some("couple"));
        assert_eq!(dest.coordinates.map(|c| c.latitude), Some(37.02));
    }

    #[test]
    fn test_label() {
        assert_eq!(Destination::new("Kyoto").with_region("Japan, Asia").label(), "Kyoto (Japan, Asia)");
        assert_eq!(Destination::new("Nowhere").label(), "Nowhere");
    }
}
