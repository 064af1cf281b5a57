//! Prompt Loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;

/// Template name for the itinerary request
pub const ITINERARY_TEMPLATE: &str = "itinerary";

/// Context for rendering the itinerary template
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryPromptContext {
    /// Destination names joined with ", "
    pub destinations: String,
    /// Requested trip length in days
    pub num_days: usize,
    /// Travel type (e.g. "family"), "general" when unknown
    pub travel_type: String,
}

impl ItineraryPromptContext {
    pub fn new<S: AsRef<str>>(destination_names: &[S], num_days: usize, travel_type: Option<&str>) -> Self {
        Self {
            destinations: destination_names
                .iter()
                .map(|name| name.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
            num_days,
            travel_type: travel_type.unwrap_or("general").to_string(),
        }
    }
}

/// Loads and renders prompt templates
#[derive(Debug, Clone)]
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g., `.travelagent/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (e.g., `prompts/`)
    repo_dir: Option<PathBuf>,
}

fn engine() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    // Prompts are plain text, not HTML
    hbs.register_escape_fn(handlebars::no_escape);
    hbs
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    ///
    /// # Arguments
    /// * `root` - Directory used to find `.travelagent/prompts/` and `prompts/`
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let user_dir = root.join(".travelagent/prompts");
        let repo_dir = root.join("prompts");

        Self {
            hbs: engine(),
            user_dir: if user_dir.exists() { Some(user_dir) } else { None },
            repo_dir: if repo_dir.exists() { Some(repo_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        Self {
            hbs: engine(),
            user_dir: None,
            repo_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.travelagent/prompts/{name}.pmt`
    /// 2. Repo default: `prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        // Try user override first
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from user override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        // Try repo default
        if let Some(ref repo_dir) = self.repo_dir {
            let path = repo_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from repo: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read repo prompt {}: {}", path.display(), e));
            }
        }

        // Fall back to embedded
        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render the itinerary request prompt
    pub fn render_itinerary(&self, context: &ItineraryPromptContext) -> Result<String> {
        let template = self.load_template(ITINERARY_TEMPLATE)?;
        info!(
            "Rendering template '{}' for {} days ({})",
            ITINERARY_TEMPLATE, context.num_days, context.travel_type
        );

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", ITINERARY_TEMPLATE, e))
    }
}
