//! Advisory client: optional AI read of a candle.
//!
//! The client sends the instrument name and candle to a generative-text
//! provider, enforces the fixed response shape, and reports the result as an
//! [`AdvisoryOutcome`]. No error crosses this boundary: a missing credential,
//! a transport failure, an HTTP error and a malformed or incomplete response
//! all come back as [`AdvisoryOutcome::Absent`].

pub mod gemini;
pub mod prompt;
pub mod provider;

pub use gemini::GeminiProvider;
pub use provider::{AdvisoryError, AdvisoryProvider};

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use tracing::{debug, info, warn};

use crate::domain::{AiAnalysis, CandleData, Instrument};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Everything the client needs, resolved once at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Never read from or written to config files.
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AdvisoryConfig {
    /// Fill `api_key` from the process environment (and a `.env` file, if any).
    pub fn with_env_credential(mut self) -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                warn!(error = %e, "failed to load .env file");
            }
        }
        self.api_key = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

/// Result of one advisory call.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvisoryOutcome {
    Analysis(AiAnalysis),
    /// No analysis. `reason` is diagnostic text for logs only; every absent
    /// outcome is presented the same way.
    Absent { reason: String },
}

impl AdvisoryOutcome {
    pub fn is_absent(&self) -> bool {
        matches!(self, AdvisoryOutcome::Absent { .. })
    }

    pub fn into_analysis(self) -> Option<AiAnalysis> {
        match self {
            AdvisoryOutcome::Analysis(a) => Some(a),
            AdvisoryOutcome::Absent { .. } => None,
        }
    }
}

/// Parse and validate provider text into an analysis.
///
/// Syntax errors are [`AdvisoryError::Malformed`]; missing fields, wrong types
/// and out-of-range numbers are [`AdvisoryError::Schema`].
pub fn parse_analysis(text: &str) -> Result<AiAnalysis, AdvisoryError> {
    let analysis: AiAnalysis = serde_json::from_str(text.trim()).map_err(|e| match e.classify() {
        Category::Data => AdvisoryError::Schema(e.to_string()),
        Category::Syntax | Category::Eof | Category::Io => AdvisoryError::Malformed(e.to_string()),
    })?;
    analysis.check_ranges().map_err(AdvisoryError::Schema)?;
    Ok(analysis)
}

/// Stateless, reentrant advisory client.
///
/// Holds no per-call state; single-flight is the caller's job.
pub struct AdvisoryClient {
    provider: Option<Box<dyn AdvisoryProvider>>,
}

impl AdvisoryClient {
    pub fn new(provider: Box<dyn AdvisoryProvider>) -> Self {
        Self { provider: Some(provider) }
    }

    /// A client whose every call is absent.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    /// Build a Gemini-backed client. A client that cannot be built is
    /// logged and replaced by a disabled one.
    pub fn from_config(config: &AdvisoryConfig) -> Self {
        match GeminiProvider::new(config) {
            Ok(p) => {
                if p.is_available() {
                    info!(model = %config.model, "advisory enabled");
                } else {
                    info!("advisory disabled: no API key in environment");
                }
                Self::new(Box::new(p))
            }
            Err(e) => {
                warn!(error = %e, "advisory client unavailable");
                Self::disabled()
            }
        }
    }

    /// Whether a call has any chance of producing an analysis.
    pub fn is_enabled(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_available())
    }

    pub fn provider_name(&self) -> &str {
        self.provider.as_ref().map_or("none", |p| p.name())
    }

    /// Ask the provider for an analysis of `candle` on `instrument`.
    pub fn analyze_candle_structure(&self, instrument: &Instrument, candle: &CandleData) -> AdvisoryOutcome {
        match self.try_analyze(instrument, candle) {
            Ok(analysis) => {
                debug!(instrument = %instrument.id, bias = %analysis.bias, "analysis received");
                AdvisoryOutcome::Analysis(analysis)
            }
            Err(e) => {
                warn!(instrument = %instrument.id, provider = self.provider_name(), error = %e, "advisory call failed");
                AdvisoryOutcome::Absent { reason: e.to_string() }
            }
        }
    }

    fn try_analyze(&self, instrument: &Instrument, candle: &CandleData) -> Result<AiAnalysis, AdvisoryError> {
        let provider = self.provider.as_ref().ok_or(AdvisoryError::MissingCredential)?;
        let prompt = prompt::build_prompt(instrument, candle);
        let schema = prompt::response_schema();
        let text = provider.generate(&prompt, &schema)?;
        parse_analysis(&text)
    }
}
