//! Advisory provider trait and structured error types.
//!
//! The AdvisoryProvider trait abstracts over the generative-text backend so
//! the client can be exercised against an in-process mock.

use thiserror::Error;

/// Everything that can go wrong between building a prompt and holding a
/// validated analysis. None of these escape [`super::AdvisoryClient`].
#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("network unreachable: {0}")]
    Network(String),

    #[error("rate limited by provider")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("request rejected as unauthorized: {0}")]
    Unauthorized(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("prompt blocked by provider: {0}")]
    Blocked(String),

    #[error("provider returned no text")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    Malformed(String),

    #[error("response does not match the analysis schema: {0}")]
    Schema(String),
}

/// A backend that turns a prompt plus a JSON response schema into raw text.
///
/// Implementations do not interpret the text; parsing and validation happen
/// in the client so every provider gets the same strictness.
pub trait AdvisoryProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Send one generation request and return the model's text output.
    fn generate(&self, prompt: &str, schema: &serde_json::Value) -> Result<String, AdvisoryError>;

    /// Whether a call could succeed at all (credential present).
    fn is_available(&self) -> bool;
}
