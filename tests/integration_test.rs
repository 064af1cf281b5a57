//! Integration tests for the travel agent
//!
//! These tests drive the full pipeline through the public API and the binary.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use assert_cmd::Command;
use async_trait::async_trait;
use chrono::NaiveDate;
use predicates::prelude::*;
use tempfile::TempDir;

use travelagent::catalog::{self, CatalogSource, EmbeddedCatalog, JsonFileCatalog};
use travelagent::domain::{ConversationState, Destination};
use travelagent::llm::{LlmError, OfflineGenerator, TextGenerator};
use travelagent::pipeline::{FOLLOWUP_HEADER, NO_MATCHES_MESSAGE, Pipeline, SUGGESTION_HEADER};
use travelagent::prompts::PromptLoader;

const REFERENCE_REQUEST: &str = "I want a beach trip in Europe on a low budget for 7 days in summer";

/// Replies with a fixed number of day sections
struct StubGenerator {
    days: usize,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn new(days: usize) -> Self {
        Self {
            days,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut text = String::from("### Your Trip\n\n");
        for n in 1..=self.days {
            text.push_str(&format!("**Day {n}: Highlights {n}**\n- Morning: coffee\n- Evening: sunset\n\n"));
        }
        text.push_str("**Key Recommendations:**\n- Book early\n");
        Ok(text)
    }
}

fn pipeline(generator: Arc<dyn TextGenerator>) -> Pipeline {
    let catalog = catalog::load(&EmbeddedCatalog);
    Pipeline::standard(catalog, generator, PromptLoader::embedded_only(), Duration::from_secs(5))
}

fn names(destinations: &[Destination]) -> Vec<&str> {
    destinations.iter().map(|d| d.name.as_str()).collect()
}

// =============================================================================
// Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_reference_request() {
    let state = pipeline(Arc::new(StubGenerator::new(7)))
        .run(ConversationState::from_message(REFERENCE_REQUEST))
        .await;

    let prefs = &state.preferences;
    assert_eq!(prefs.interest.as_deref(), Some("beach"));
    assert_eq!(prefs.region.as_deref(), Some("europe"));
    assert_eq!(prefs.budget.as_deref(), Some("low"));
    assert_eq!(prefs.duration.as_deref(), Some("7 days"));
    assert!(!state.is_followup);

    assert_eq!(names(&state.suggested_destinations), vec!["Algarve", "Costa Brava"]);
    // No start date, so no itinerary
    assert!(state.itinerary.is_empty());

    let response = state.final_response.expect("response is always set");
    assert!(response.starts_with(SUGGESTION_HEADER));
    assert!(response.contains("- Algarve (Portugal, Europe)"));
}

#[tokio::test]
async fn test_followup_request_uses_followup_header() {
    let pipeline = pipeline(Arc::new(StubGenerator::new(1)));
    let first = pipeline
        .run(ConversationState::from_message("luxury beach holiday in europe"))
        .await;
    assert_eq!(names(&first.suggested_destinations), vec!["Santorini"]);

    let second = pipeline.respond(first, "actually, show me something cheaper").await;

    assert!(second.is_followup);
    assert!(!second.suggested_destinations.is_empty());
    assert!(second.final_response.unwrap().starts_with(FOLLOWUP_HEADER));
}

#[tokio::test]
async fn test_no_matches() {
    let state = pipeline(Arc::new(StubGenerator::new(1)))
        .run(ConversationState::from_message("a luxury mountain trip in africa"))
        .await;

    assert!(state.suggested_destinations.is_empty());
    assert_eq!(state.final_response.as_deref(), Some(NO_MATCHES_MESSAGE));
}

#[tokio::test]
async fn test_itinerary_with_dates() {
    let generator = Arc::new(StubGenerator::new(7));
    let mut state = ConversationState::from_message(REFERENCE_REQUEST);
    state.preferences.start_date = NaiveDate::from_ymd_opt(2025, 8, 1);

    let state = pipeline(generator.clone()).run(state).await;

    // "7 days" sets the span when no end date is given
    assert_eq!(state.itinerary.len(), 7);
    assert_eq!(state.itinerary[6].date, NaiveDate::from_ymd_opt(2025, 8, 7).unwrap());
    assert!(state.itinerary[6].activities.contains("Book early"));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

    let response = state.final_response.unwrap();
    assert!(response.starts_with("Here's a travel plan for your trip to Algarve in Portugal, Europe:"));
    assert!(response.contains("Day 1 (2025-08-01): Highlights 1"));
}

#[tokio::test]
async fn test_offline_generator_falls_back() {
    let mut state = ConversationState::from_message("beach in asia");
    state.preferences.start_date = NaiveDate::from_ymd_opt(2025, 3, 1);
    state.preferences.end_date = NaiveDate::from_ymd_opt(2025, 3, 3);

    let state = pipeline(Arc::new(OfflineGenerator::new("no API key"))).run(state).await;

    assert_eq!(state.itinerary.len(), 3);
    for (index, day) in state.itinerary.iter().enumerate() {
        assert_eq!(day.activities, format!("Day {}: Explore Bali", index + 1));
    }
}

#[tokio::test]
async fn test_unresolvable_duration_still_responds() {
    let generator = Arc::new(StubGenerator::new(7));
    let mut state = ConversationState::from_message("beach in europe");
    state.preferences.start_date = NaiveDate::from_ymd_opt(2025, 1, 1);
    state.preferences.duration = Some("99999999999999999 days".to_string());

    let state = pipeline(generator.clone()).run(state).await;

    assert!(state.itinerary.is_empty());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    assert!(state.final_response.unwrap().starts_with(SUGGESTION_HEADER));
}

#[test]
fn test_missing_catalog_file_is_empty_catalog() {
    let source = JsonFileCatalog::new("/nonexistent/destinations.json");
    assert!(source.load_catalog().is_empty());
}

// =============================================================================
// CLI Tests
// =============================================================================

/// Binary isolated from the user's config, logs and API keys
fn travelagent(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("travelagent").expect("binary builds");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_no_command_prints_help() {
    let home = TempDir::new().unwrap();
    travelagent(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_plan_text() {
    let home = TempDir::new().unwrap();
    travelagent(&home)
        .args(["plan", REFERENCE_REQUEST])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(SUGGESTION_HEADER))
        .stdout(predicate::str::contains("Costa Brava"));
}

#[test]
fn test_cli_plan_json_offline_itinerary() {
    let home = TempDir::new().unwrap();
    let output = travelagent(&home)
        .args([
            "plan",
            "mountain adventure",
            "--start",
            "2025-09-10",
            "--end",
            "2025-09-12",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["result"].as_str().unwrap().starts_with("Here's a travel plan"));
    assert_eq!(json["itinerary"].as_array().unwrap().len(), 3);
    assert_eq!(json["itinerary"][0]["date"], "2025-09-10");
    assert_eq!(json["itinerary"][0]["activities"], "Day 1: Explore Swiss Alps");
}

#[test]
fn test_cli_plan_far_end_date_skips_itinerary() {
    let home = TempDir::new().unwrap();
    let output = travelagent(&home)
        .args(["plan", "mountain adventure", "--start", "2025-01-01", "--end", "9999-12-31", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["itinerary"].as_array().unwrap().is_empty());
    assert!(json["result"].as_str().unwrap().starts_with(SUGGESTION_HEADER));
}

#[test]
fn test_cli_plan_extra_preferences() {
    let home = TempDir::new().unwrap();
    let output = travelagent(&home)
        .args(["plan", "beach trip", "--pref", "budget=high", "--pref", "popularity=quiet", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["preferences"]["budget"], "high");
    assert_eq!(json["preferences"]["extra"]["popularity"], "quiet");
    let names: Vec<&str> = json["destinations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Santorini", "Sydney"]);
}

#[test]
fn test_cli_logs_tail() {
    let home = TempDir::new().unwrap();
    travelagent(&home)
        .args(["logs"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No log file at"));

    travelagent(&home).args(["plan", "beach trip"]).assert().success();
    let output = travelagent(&home).args(["logs", "-n", "1"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn test_cli_plan_followup() {
    let home = TempDir::new().unwrap();
    travelagent(&home)
        .args(["plan", "something different please", "--prior", "beach in asia"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(FOLLOWUP_HEADER))
        .stdout(predicate::str::contains("Bali"));
}

#[test]
fn test_cli_destinations_with_custom_catalog() {
    let home = TempDir::new().unwrap();
    let catalog_path = home.path().join("catalog.json");
    std::fs::write(
        &catalog_path,
        r#"[{"name": "Hidden Cove", "region": "Somewhere, Europe", "tags": ["beach"]},
            {"name": "High Peak", "region": "Elsewhere, Asia", "tags": ["mountain"]}]"#,
    )
    .unwrap();
    let config_path = home.path().join("travelagent.yml");
    std::fs::write(&config_path, format!("catalog:\n  path: {}\n", catalog_path.display())).unwrap();

    travelagent(&home)
        .args(["-c", config_path.to_str().unwrap(), "destinations", "--style", "beach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hidden Cove"))
        .stdout(predicate::str::contains("High Peak").not());
}

#[test]
fn test_cli_estimate() {
    let home = TempDir::new().unwrap();
    travelagent(&home)
        .args([
            "estimate",
            "Paris",
            "--days",
            "2",
            "--budget",
            "luxury",
            "--travel-type",
            "couple",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,600.00"));
}

#[test]
fn test_cli_estimate_rejects_unknown_budget() {
    let home = TempDir::new().unwrap();
    travelagent(&home)
        .args(["estimate", "Paris", "--days", "2", "--budget", "cheap", "--travel-type", "couple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown budget level"));
}
