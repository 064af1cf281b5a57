//! Typed user preferences
//!
//! Every preference the agent knows how to reason about has a named field so
//! the filter logic is checked at compile time. Anything else lands in `extra`.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Text-valued preference keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    PreferredCity,
    Region,
    Interest,
    TravelStyle,
    Budget,
    TravelType,
    Season,
    Duration,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 8] = [
        Self::PreferredCity,
        Self::Region,
        Self::Interest,
        Self::TravelStyle,
        Self::Budget,
        Self::TravelType,
        Self::Season,
        Self::Duration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreferredCity => "preferred_city",
            Self::Region => "region",
            Self::Interest => "interest",
            Self::TravelStyle => "travel_style",
            Self::Budget => "budget",
            Self::TravelType => "travel_type",
            Self::Season => "season",
            Self::Duration => "duration",
        }
    }
}

impl std::fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PreferenceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown preference key: {}", s))
    }
}

/// Structured trip preferences derived from the conversation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,

    /// Free text like "7 days"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Keys with no typed field
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Preferences {
    fn slot_mut(&mut self, key: PreferenceKey) -> &mut Option<String> {
        match key {
            PreferenceKey::PreferredCity => &mut self.preferred_city,
            PreferenceKey::Region => &mut self.region,
            PreferenceKey::Interest => &mut self.interest,
            PreferenceKey::TravelStyle => &mut self.travel_style,
            PreferenceKey::Budget => &mut self.budget,
            PreferenceKey::TravelType => &mut self.travel_type,
            PreferenceKey::Season => &mut self.season,
            PreferenceKey::Duration => &mut self.duration,
        }
    }

    /// Set (or overwrite) a text preference
    pub fn set(&mut self, key: PreferenceKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    /// Get a text preference
    pub fn get(&self, key: PreferenceKey) -> Option<&str> {
        let slot = match key {
            PreferenceKey::PreferredCity => &self.preferred_city,
            PreferenceKey::Region => &self.region,
            PreferenceKey::Interest => &self.interest,
            PreferenceKey::TravelStyle => &self.travel_style,
            PreferenceKey::Budget => &self.budget,
            PreferenceKey::TravelType => &self.travel_type,
            PreferenceKey::Season => &self.season,
            PreferenceKey::Duration => &self.duration,
        };
        slot.as_deref()
    }

    /// Set an arbitrary key, routing known names to their typed field
    pub fn set_raw(&mut self, key: &str, value: impl Into<String>) {
        match key.parse::<PreferenceKey>() {
            Ok(known) => self.set(known, value),
            Err(_) => {
                self.extra.insert(key.to_string(), value.into());
            }
        }
    }

    /// Key-wise overwrite with every value present in `other`
    ///
    /// Keys absent from `other` are left untouched.
    pub fn merge(&mut self, other: Preferences) {
        debug!(?other, "merge: called");
        for key in PreferenceKey::ALL {
            if let Some(value) = other.get(key) {
                self.set(key, value);
            }
        }
        if other.start_date.is_some() {
            self.start_date = other.start_date;
        }
        if other.end_date.is_some() {
            self.end_date = other.end_date;
        }
        self.extra.extend(other.extra);
    }

    /// True when no preference of any kind is set
    pub fn is_empty(&self) -> bool {
        PreferenceKey::ALL.iter().all(|key| self.get(*key).is_none())
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.extra.is_empty()
    }

    /// Number of days named by `duration` ("7 days" -> 7)
    pub fn duration_days(&self) -> Option<i64> {
        self.duration
            .as_deref()?
            .split_whitespace()
            .next()
            .and_then(|n| n.parse::<i64>().ok())
    }

    /// Last day of the trip
    ///
    /// Explicit end date first, then start + duration, then a single-day trip.
    /// None when there is no start date or the duration runs past the
    /// representable calendar.
    pub fn resolved_end_date(&self) -> Option<NaiveDate> {
        let start = self.start_date?;
        if let Some(end) = self.end_date {
            return Some(end);
        }
        match self.duration_days() {
            Some(days) => {
                let offset = days.checked_sub(1).and_then(TimeDelta::try_days)?;
                start.checked_add_signed(offset)
            }
            None => Some(start),
        }
    }

    /// Inclusive number of trip days, `(end - start).days + 1`
    ///
    /// May be zero or negative when the end precedes the start. None when
    /// the end cannot be resolved.
    pub fn day_count(&self) -> Option<i64> {
        let start = self.start_date?;
        let end = self.resolved_end_date()?;
        Some((end - start).num_days() + 1)
    }
}
