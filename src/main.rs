//! Travel Agent
//!
//! CLI entry point for planning trips, browsing the catalog and estimating costs.

use std::fs;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use travelagent::catalog;
use travelagent::cli::{Cli, Command, OutputFormat, get_log_dir, get_log_path};
use travelagent::config::Config;
use travelagent::cost::{BudgetLevel, Currency, PartyType, estimate_trip_cost};
use travelagent::domain::{ConversationState, PreferenceKey, Preferences};
use travelagent::llm;
use travelagent::pipeline::{Pipeline, filter_destinations};
use travelagent::prompts::PromptLoader;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = get_log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(get_log_path()).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `logs` reads the file that setup_logging would truncate
    if let Some(Command::Logs { lines }) = cli.command {
        return cmd_logs(lines);
    }

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "Travel agent loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Some(Command::Plan {
            message,
            prior,
            start,
            end,
            prefs,
            format,
        }) => cmd_plan(&config, message, prior, start, end, prefs, format).await,
        Some(Command::Destinations {
            region,
            style,
            budget,
            travel_type,
            format,
        }) => cmd_destinations(&config, region, style, budget, travel_type, format),
        Some(Command::Estimate {
            destinations,
            days,
            budget,
            travel_type,
            travelers,
            currency,
            format,
        }) => cmd_estimate(&destinations, days, budget, travel_type, travelers, currency, format),
        Some(Command::Logs { .. }) => Ok(()),
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Run the pipeline over the conversation and print the response
async fn cmd_plan(
    config: &Config,
    message: String,
    prior: Vec<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    prefs: Vec<(String, String)>,
    format: OutputFormat,
) -> Result<()> {
    let catalog = catalog::load(catalog::source_from_config(&config.catalog).as_ref());
    let generator = llm::create_generator_or_offline(&config.llm, config.planner.max_tokens);
    let prompt_root = match &config.planner.prompts_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let pipeline = Pipeline::standard(
        catalog,
        generator,
        PromptLoader::new(prompt_root),
        config.planner.generation_timeout(),
    );

    // Earlier turns only shape preferences and suggestions
    let mut state = ConversationState::default();
    for earlier in prior {
        state = pipeline.respond(state, earlier).await;
    }
    state.preferences.start_date = start;
    state.preferences.end_date = end;
    for (key, value) in prefs {
        state.preferences.set_raw(&key, value);
    }
    let state = pipeline.respond(state, message).await;

    let response = state.final_response.clone().unwrap_or_default();
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "result": response,
                "preferences": state.preferences,
                "destinations": state.suggested_destinations,
                "itinerary": state.itinerary,
                "is_followup": state.is_followup,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("{}", response);
        }
    }

    Ok(())
}

/// List catalog entries matching the given filters
fn cmd_destinations(
    config: &Config,
    region: Option<String>,
    style: Option<String>,
    budget: Option<String>,
    travel_type: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let catalog = catalog::load(catalog::source_from_config(&config.catalog).as_ref());

    let mut prefs = Preferences::default();
    for (key, value) in [
        (PreferenceKey::Region, region),
        (PreferenceKey::TravelStyle, style),
        (PreferenceKey::Budget, budget),
        (PreferenceKey::TravelType, travel_type),
    ] {
        if let Some(value) = value {
            prefs.set(key, value);
        }
    }
    let matches = filter_destinations(&prefs, &catalog);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        OutputFormat::Text => {
            println!("{}", format!("{} of {} destinations", matches.len(), catalog.len()).bright_cyan().bold());
            for dest in &matches {
                let details = [dest.budget.as_deref(), dest.travel_type.as_deref()]
                    .into_iter()
                    .flatten()
                    .chain(dest.tags.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("  {} {}", dest.label().yellow(), format!("[{}]", details).dimmed());
            }
        }
    }

    Ok(())
}

/// Print a trip cost estimate
fn cmd_estimate(
    destinations: &[String],
    days: u32,
    budget: BudgetLevel,
    party: PartyType,
    travelers: u32,
    currency: Currency,
    format: OutputFormat,
) -> Result<()> {
    let estimate = estimate_trip_cost(days, destinations, budget, party, travelers, currency);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&estimate)?);
        }
        OutputFormat::Text => {
            println!("{}", "Trip Cost Estimate".bright_cyan().bold());
            println!("-------------------");
            println!("Destinations: {}", destinations.join(", "));
            println!("Duration:     {} days, {} traveler(s)", days, travelers);
            println!("Budget:       {} ({})", budget, party);
            println!("Multiplier:   x{:.1}", estimate.multiplier);
            println!("Total:        {}", estimate.formatted_total().green().bold());
            if currency != Currency::Usd {
                println!("              (${:.2} USD at {} {}/USD)", estimate.total_usd, estimate.exchange_rate, currency);
            }
        }
    }

    Ok(())
}

/// Print the last `lines` lines of the log file
fn cmd_logs(lines: usize) -> Result<()> {
    let log_path = get_log_path();
    if !log_path.exists() {
        println!("No log file at {}", log_path.display());
        return Ok(());
    }

    let content = fs::read_to_string(&log_path).context("Failed to read log file")?;
    let all: Vec<&str> = content.lines().collect();
    for line in &all[all.len().saturating_sub(lines)..] {
        println!("{}", line);
    }
    Ok(())
}
