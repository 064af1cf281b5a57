//! Travel Agent - conversational trip planning
//!
//! A user message flows through a fixed pipeline of stages that share one
//! `ConversationState`: preferences are extracted from the text, the
//! destination catalog is filtered against them, the message is classified
//! as a fresh request or a follow-up, an itinerary is synthesized when trip
//! dates are known, and a single response is rendered.
//!
//! # Core Concepts
//!
//! - **Total pipeline**: no stage fails; every run ends with a response
//! - **Narrow capabilities**: catalog and text generation sit behind traits
//! - **Typed preferences**: known keys are fields, unknown keys go to `extra`
//!
//! # Modules
//!
//! - [`domain`] - Preferences, destinations, itinerary days and state
//! - [`catalog`] - Destination catalog sources
//! - [`llm`] - Text generation trait and provider clients
//! - [`prompts`] - Prompt templates
//! - [`pipeline`] - Stages and the orchestrator
//! - [`cost`] - Trip cost estimates
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod cost;
pub mod domain;
pub mod llm;
pub mod pipeline;
pub mod prompts;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CatalogSource, EmbeddedCatalog, JsonFileCatalog};
pub use config::{CatalogConfig, Config, LlmConfig, PlannerConfig};
pub use cost::{BudgetLevel, CostEstimate, Currency, PartyType, estimate_trip_cost};
pub use domain::{ChatTurn, ConversationState, Day, Destination, PreferenceKey, Preferences, Speaker};
pub use llm::{LlmError, OfflineGenerator, TextGenerator};
pub use pipeline::{ItinerarySynthesizer, Pipeline, Stage, SynthesisOutcome};
pub use prompts::PromptLoader;
