//! Google Gemini advisory provider.
//!
//! Calls the `generateContent` REST endpoint with a JSON response schema and
//! returns the first candidate's text. No retries: the advisory feature is
//! optional and a failed call simply yields no analysis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{AdvisoryError, AdvisoryProvider};
use super::AdvisoryConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    client: reqwest::blocking::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(config: &AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("tradesize/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdvisoryError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Pull a readable message out of an error body, falling back to the raw text.
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(env) => match env.error.status {
                Some(status) => format!("{status}: {}", env.error.message),
                None => env.error.message,
            },
            Err(_) => body.chars().take(200).collect(),
        }
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(resp: GenerateContentResponse) -> Result<String, AdvisoryError> {
        if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AdvisoryError::Blocked(reason));
        }

        let candidate = resp.candidates.into_iter().next().ok_or(AdvisoryError::EmptyResponse)?;
        if let Some(reason) = &candidate.finish_reason {
            debug!(finish_reason = %reason, "gemini candidate finished");
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AdvisoryError::EmptyResponse);
        }
        Ok(text)
    }
}

impl AdvisoryProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, prompt: &str, schema: &serde_json::Value) -> Result<String, AdvisoryError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisoryError::MissingCredential)?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent { role: "user", parts: vec![RequestPart { text: prompt }] }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            },
        };

        debug!(model = %self.model, "sending generateContent request");
        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| AdvisoryError::Network(e.to_string()))?;

        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            return Err(AdvisoryError::RateLimited { retry_after_secs });
        }

        let text = resp.text().map_err(|e| AdvisoryError::Network(e.to_string()))?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AdvisoryError::Unauthorized(Self::error_message(&text)));
        }

        if !status.is_success() {
            return Err(AdvisoryError::Http { status: status.as_u16(), message: Self::error_message(&text) });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| AdvisoryError::Malformed(format!("generateContent envelope: {e}")))?;

        Self::extract_text(parsed)
    }

    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }
}
