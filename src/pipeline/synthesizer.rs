//! Itinerary synthesis
//!
//! Asks the text generator for a day-by-day plan, parses the reply into one
//! block per day and dates each block from the trip start. Whatever goes
//! wrong during generation or parsing, the state ends up with exactly one
//! entry per trip day: missing days and failed calls use a fixed
//! "Day N: Explore X" line.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use regex::Regex;
use tracing::{debug, info, warn};

use super::Stage;
use crate::domain::{ConversationState, Day};
use crate::llm::{LlmError, TextGenerator};
use crate::prompts::{ItineraryPromptContext, PromptLoader};

/// Default bound on a single generation call
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(90);

/// Longest trip, in days, that gets an itinerary
pub const MAX_TRIP_DAYS: i64 = 366;

/// `Day 3`, `**Day 3: Title**`, `### Day 3 - Title`
static DAY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:#{1,6}\s*)?(?:\*\*|__)?\s*Day\s+\d+\b\s*(?:[:.\-]\s*)?(?P<title>.*)$")
        .expect("day header regex is valid")
});

/// `**Key Recommendations:**`, `Travel Tips`, `## Key Recommendations`
static RECOMMENDATIONS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:#{1,6}\s*)?(?:\*\*|__)?\s*(?:Key Recommendations|Travel Tips)\b")
        .expect("recommendations regex is valid")
});

/// Why synthesis did not run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoDestinations,
    NoStartDate,
    /// The duration does not give a calendar end date
    UnresolvableEndDate { start: NaiveDate, duration: Option<String> },
    /// End date before the start date
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    /// More than `MAX_TRIP_DAYS` days
    TripTooLong { days: i64 },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDestinations => write!(f, "no suggested destinations"),
            Self::NoStartDate => write!(f, "no trip start date"),
            Self::UnresolvableEndDate { start, duration } => write!(
                f,
                "no end date from start {} and duration {}",
                start,
                duration.as_deref().unwrap_or("(none)")
            ),
            Self::InvalidDateRange { start, end } => write!(f, "end date {} is before start date {}", end, start),
            Self::TripTooLong { days } => write!(f, "{} days exceeds the {}-day limit", days, MAX_TRIP_DAYS),
        }
    }
}

/// What happened during one synthesis attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    /// Preconditions not met; the state was left unchanged
    Skipped { reason: SkipReason },
    /// `days` blocks came from the generator, `padded` were filled with fallback lines
    Generated { days: usize, padded: usize },
    /// The generation call failed or timed out; fallback itinerary used
    Failed { transient: bool, message: String },
    /// The reply had no recognizable day structure; fallback itinerary used
    Unparseable { reason: String },
}

impl SynthesisOutcome {
    /// True when the whole itinerary is the placeholder plan
    pub fn used_fallback(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Unparseable { .. })
    }
}

/// Day blocks and trailing recommendations parsed from a generated reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedItinerary {
    pub days: Vec<String>,
    pub recommendations: Option<String>,
}

fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

fn join_block(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

/// Split a generated reply into per-day blocks
///
/// Returns None when the reply contains no day header.
pub fn parse_itinerary(text: &str) -> Option<ParsedItinerary> {
    debug!(len = text.len(), "parse_itinerary: called");
    let lines: Vec<&str> = text.lines().filter(|line| !is_separator(line)).collect();

    let split_at = lines
        .iter()
        .position(|line| RECOMMENDATIONS_HEADER.is_match(line))
        .unwrap_or(lines.len());
    let (body, tail) = lines.split_at(split_at);

    let mut days: Vec<Vec<&str>> = Vec::new();
    for &line in body {
        if let Some(caps) = DAY_HEADER.captures(line) {
            let title = caps
                .name("title")
                .map(|m| m.as_str().trim().trim_end_matches("**").trim_end_matches("__").trim())
                .unwrap_or("");
            days.push(if title.is_empty() { Vec::new() } else { vec![title] });
        } else if let Some(current) = days.last_mut() {
            current.push(line);
        }
        // Anything before the first header is preamble
    }

    if days.is_empty() {
        debug!("parse_itinerary: no day headers");
        return None;
    }

    let recommendations = Some(join_block(tail)).filter(|r| !r.is_empty());
    Some(ParsedItinerary {
        days: days.iter().map(|block| join_block(block)).collect(),
        recommendations,
    })
}

/// Placeholder text for day `index` (zero-based)
pub fn fallback_activity(index: usize, destination: &str) -> String {
    format!("Day {}: Explore {}", index + 1, destination)
}

/// Consecutive dates from `start`, stopping early only at the end of the calendar
fn trip_dates(start: NaiveDate, num_days: usize) -> impl Iterator<Item = NaiveDate> {
    (0..num_days as u64).map_while(move |offset| start.checked_add_days(Days::new(offset)))
}

/// Dated placeholder itinerary of exactly `num_days` entries
pub fn fallback_itinerary(start: NaiveDate, num_days: usize, destination: &str) -> Vec<Day> {
    trip_dates(start, num_days)
        .enumerate()
        .map(|(index, date)| Day::new(date, fallback_activity(index, destination)))
        .collect()
}

fn dated(start: NaiveDate, activities: Vec<String>) -> Vec<Day> {
    trip_dates(start, activities.len())
        .zip(activities)
        .map(|(date, text)| Day::new(date, text))
        .collect()
}

/// Stage that turns suggestions plus dates into a dated itinerary
pub struct ItinerarySynthesizer {
    generator: Arc<dyn TextGenerator>,
    prompts: PromptLoader,
    timeout: Duration,
}

impl ItinerarySynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: PromptLoader) -> Self {
        Self {
            generator,
            prompts,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Override the generation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(self.timeout)),
        }
    }

    /// Fill `state.itinerary` and report how it was produced
    ///
    /// The itinerary is replaced wholesale unless the outcome is `Skipped`.
    pub async fn synthesize(&self, state: &mut ConversationState) -> SynthesisOutcome {
        debug!("synthesize: called");
        let Some(first) = state.headline_destination() else {
            return SynthesisOutcome::Skipped {
                reason: SkipReason::NoDestinations,
            };
        };
        let first_name = first.name.clone();

        let prefs = &state.preferences;
        let Some(start) = prefs.start_date else {
            return SynthesisOutcome::Skipped {
                reason: SkipReason::NoStartDate,
            };
        };
        let Some(end) = prefs.resolved_end_date() else {
            return SynthesisOutcome::Skipped {
                reason: SkipReason::UnresolvableEndDate {
                    start,
                    duration: prefs.duration.clone(),
                },
            };
        };
        let day_count = prefs.day_count().unwrap_or_default();
        if day_count < 1 {
            return SynthesisOutcome::Skipped {
                reason: SkipReason::InvalidDateRange { start, end },
            };
        }
        if day_count > MAX_TRIP_DAYS {
            return SynthesisOutcome::Skipped {
                reason: SkipReason::TripTooLong { days: day_count },
            };
        }
        let num_days = day_count as usize;

        let names: Vec<&str> = state.suggested_destinations.iter().map(|d| d.name.as_str()).collect();
        let context = ItineraryPromptContext::new(&names, num_days, prefs.travel_type.as_deref());

        let (outcome, itinerary) = match self.prompts.render_itinerary(&context) {
            Err(e) => (
                SynthesisOutcome::Failed {
                    transient: false,
                    message: e.to_string(),
                },
                None,
            ),
            Ok(prompt) => match self.generate(&prompt).await {
                Err(e) => (
                    SynthesisOutcome::Failed {
                        transient: e.is_retryable(),
                        message: e.to_string(),
                    },
                    None,
                ),
                Ok(text) => match parse_itinerary(&text) {
                    None => (
                        SynthesisOutcome::Unparseable {
                            reason: "reply contains no day headers".to_string(),
                        },
                        None,
                    ),
                    Some(parsed) => {
                        let generated = parsed.days.len().min(num_days);
                        let mut activities: Vec<String> = parsed.days.into_iter().take(num_days).collect();
                        activities.extend((generated..num_days).map(|index| fallback_activity(index, &first_name)));
                        if let (Some(recommendations), Some(last)) = (parsed.recommendations, activities.last_mut()) {
                            last.push_str("\n\n");
                            last.push_str(&recommendations);
                        }
                        (
                            SynthesisOutcome::Generated {
                                days: generated,
                                padded: num_days - generated,
                            },
                            Some(dated(start, activities)),
                        )
                    }
                },
            },
        };

        state.itinerary = itinerary.unwrap_or_else(|| fallback_itinerary(start, num_days, &first_name));
        outcome
    }
}

#[async_trait]
impl Stage for ItinerarySynthesizer {
    fn name(&self) -> &'static str {
        "create_itinerary"
    }

    async fn apply(&self, state: &mut ConversationState) {
        match self.synthesize(state).await {
            SynthesisOutcome::Skipped { reason } => {
                info!(%reason, "Itinerary synthesis skipped");
            }
            SynthesisOutcome::Generated { days, padded } => {
                info!(days, padded, "Itinerary generated");
            }
            SynthesisOutcome::Failed { transient, message } => {
                warn!(transient, %message, "Itinerary generation failed, using fallback plan");
            }
            SynthesisOutcome::Unparseable { reason } => {
                warn!(%reason, "Itinerary reply unparseable, using fallback plan");
            }
        }
    }
}
