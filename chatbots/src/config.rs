//! Settings shared by every chatbot binary.
//!
//! Values come from command-line flags first, then the environment (after
//! loading `.env`), then built-in defaults. `GEMINI_API_KEY` has no default:
//! without it the binaries refuse to start.

use crate::error::{Error, Result};
use agentic::llm::LlmProvider;
use agentic::llm::openai::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiCompatProvider};
use agentic::runner::{DEFAULT_MAX_TURNS, RunConfig, Runner};
use clap::Args;
use std::fmt;
use std::sync::Arc;

/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Environment variable overriding the endpoint
pub const BASE_URL_ENV: &str = "GEMINI_BASE_URL";

/// Flags every binary accepts
#[derive(Debug, Clone, Default, Args)]
pub struct ModelArgs {
    /// Model name sent to the endpoint
    #[arg(long)]
    pub model: Option<String>,

    /// OpenAI-compatible base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Maximum model calls per message
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Log filter, e.g. `debug` or `agentic=debug`
    #[arg(long = "log")]
    pub log: Option<String>,
}

/// Resolved settings
#[derive(Clone)]
pub struct Settings {
    /// API key for the hosted model
    pub api_key: String,
    /// Endpoint base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Maximum model calls per message
    pub max_turns: usize,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_turns", &self.max_turns)
            .finish()
    }
}

impl Settings {
    /// Resolve settings from flags and the process environment.
    pub fn from_env(args: &ModelArgs) -> Result<Self> {
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve settings from flags and an arbitrary variable lookup.
    pub fn resolve(args: &ModelArgs, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(API_KEY_ENV).ok_or(Error::MissingApiKey(API_KEY_ENV))?;
        let model = args
            .model
            .clone()
            .or_else(|| non_empty(MODEL_ENV))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = args
            .base_url
            .clone()
            .or_else(|| non_empty(BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let max_turns = args.max_turns.unwrap_or(DEFAULT_MAX_TURNS);
        if max_turns == 0 {
            return Err(Error::InvalidSetting {
                name: "max_turns",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            api_key,
            base_url,
            model,
            max_turns,
        })
    }

    /// Provider for the configured endpoint
    pub fn provider(&self) -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_default_model(self.model.clone())
    }

    /// Run settings for the configured model
    pub fn run_config(&self) -> RunConfig {
        RunConfig::default()
            .with_model(self.model.clone())
            .with_max_turns(self.max_turns)
    }

    /// Runner wired to the configured provider
    pub fn runner(&self) -> Runner {
        let provider: Arc<dyn LlmProvider> = Arc::new(self.provider());
        Runner::new(provider).with_config(self.run_config())
    }
}

/// Load `.env` from the workspace root, falling back to the current directory.
pub fn load_dotenv() {
    if dotenvy::from_path("../.env").is_err() {
        let _ = dotenvy::dotenv();
    }
}
