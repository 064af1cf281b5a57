//! Itinerary day

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of a trip with its free-form activity text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub activities: String,
}

impl Day {
    pub fn new(date: NaiveDate, activities: impl Into<String>) -> Self {
        Self {
            date,
            activities: activities.into(),
        }
    }

    /// Date formatted as YYYY-MM-DD
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
