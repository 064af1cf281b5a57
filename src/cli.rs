//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cost::{BudgetLevel, Currency, PartyType};

/// Travel Agent - preferences in, destinations and itineraries out
#[derive(Parser)]
#[command(
    name = "travelagent",
    about = "Plan trips from a plain-language request",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/travelagent/logs/travelagent.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Run the planning pipeline for a request
    Plan {
        /// The latest user message
        message: String,

        /// Earlier user messages, oldest first
        #[arg(long = "prior", value_name = "MSG")]
        prior: Vec<String>,

        /// Trip start date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        start: Option<NaiveDate>,

        /// Trip end date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        end: Option<NaiveDate>,

        /// Extra preference, e.g. `budget=low` or `popularity=quiet`
        #[arg(long = "pref", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        prefs: Vec<(String, String)>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List catalog destinations, optionally filtered
    Destinations {
        /// Region substring (e.g. "europe")
        #[arg(long)]
        region: Option<String>,

        /// Tag the destination must carry (e.g. "beach")
        #[arg(long)]
        style: Option<String>,

        /// Budget tier (low, medium, high)
        #[arg(long)]
        budget: Option<String>,

        /// Travel type (solo, couple, family, friends)
        #[arg(long)]
        travel_type: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Estimate the cost of a trip
    Estimate {
        /// Destination names
        #[arg(required = true)]
        destinations: Vec<String>,

        /// Trip length in days
        #[arg(long)]
        days: u32,

        /// Budget level (budget, mid-range, luxury)
        #[arg(long)]
        budget: BudgetLevel,

        /// Travel type (solo, couple, family, friends)
        #[arg(long)]
        travel_type: PartyType,

        /// Number of travelers
        #[arg(long, default_value = "1")]
        travelers: u32,

        /// Currency code (USD, INR, GBP, EUR, JPY)
        #[arg(long, default_value = "USD")]
        currency: Currency,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show the tail of the log file
    Logs {
        /// Number of lines to show
        #[arg(short = 'n', long, default_value = "50")]
        lines: usize,
    },
}

/// Split `key=value`
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.trim().to_string())),
        _ => Err(format!("Expected KEY=VALUE, got: {}", s)),
    }
}

/// Output format for command results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Directory holding the log file
pub fn get_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("travelagent")
        .join("logs")
}

/// Full path of the log file
pub fn get_log_path() -> PathBuf {
    get_log_dir().join("travelagent.log")
}
