//! GeminiReviewGateway - feedback review over the Gemini REST API.
//!
//! Sends the rendered review prompt to `generateContent` with a JSON response
//! type and parses the first candidate into an [`AnalysisResult`]. There is no
//! retry: any failure is returned as `FolioError::Review`.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use folio_core::analysis::{AnalysisResult, Sentiment};
use folio_core::config::{
    DEFAULT_REVIEW_BASE_URL, DEFAULT_REVIEW_MODEL, GeminiConfig, ReviewSettings,
};
use folio_core::error::{FolioError, Result};
use folio_core::review::{ReviewGateway, ReviewRequest};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::prompt::render_review_prompt;

/// Review gateway that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiReviewGateway {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiReviewGateway {
    /// Creates a gateway with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_REVIEW_MODEL.to_string(),
            base_url: DEFAULT_REVIEW_BASE_URL.to_string(),
        }
    }

    /// Builds a gateway from `[review]` settings and the Gemini secret.
    ///
    /// `model_name` in the secret overrides the configured model.
    pub fn from_settings(settings: &ReviewSettings, secret: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FolioError::config(format!("Failed to build HTTP client: {e}")))?;

        let model = secret
            .model_name
            .clone()
            .unwrap_or_else(|| settings.model.clone());

        Ok(Self {
            client,
            api_key: secret.api_key.clone(),
            model,
            base_url: settings.base_url.clone(),
        })
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Overrides the API base URL (everything before `/{model}:generateContent`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/{model}:generateContent",
            self.base_url.trim_end_matches('/'),
            model = self.model,
        );

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|err| {
                FolioError::review(format!("Gemini API request failed: {}", err.without_url()))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| FolioError::review(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl ReviewGateway for GeminiReviewGateway {
    async fn review(&self, request: ReviewRequest) -> Result<AnalysisResult> {
        if request.feedback_text.trim().is_empty() {
            return Err(FolioError::validation("Feedback text is empty"));
        }

        let prompt = render_review_prompt(&request)?;
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        tracing::debug!(
            "[GeminiReviewGateway] Requesting review from {} ({} chars)",
            self.model,
            request.feedback_text.len()
        );

        let text = self.send_request(&body).await?;
        let analysis = parse_analysis(&text)?;

        tracing::info!(
            "[GeminiReviewGateway] Review complete: {}",
            analysis.sentiment
        );
        Ok(analysis)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Model output before the sentiment is checked against the enumeration.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    sentiment: String,
    summary: String,
    suggested_action: String,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| FolioError::review("Gemini API returned no text in the response candidates"))
}

/// Strips a surrounding markdown code fence, if the model added one anyway.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn parse_analysis(text: &str) -> Result<AnalysisResult> {
    let raw: RawAnalysis = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| FolioError::review(format!("Review response is not the expected JSON: {e}")))?;

    let sentiment = Sentiment::from_str(raw.sentiment.trim()).map_err(|_| {
        FolioError::review(format!("Unknown sentiment '{}' in review response", raw.sentiment))
    })?;

    let summary = raw.summary.trim();
    let suggested_action = raw.suggested_action.trim();
    if summary.is_empty() || suggested_action.is_empty() {
        return Err(FolioError::review(
            "Review response is missing a summary or suggested action",
        ));
    }

    Ok(AnalysisResult::new(sentiment, summary, suggested_action))
}

fn map_http_error(status: StatusCode, body: &str) -> FolioError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    FolioError::review(format!("Gemini API returned {}: {}", status.as_u16(), message))
}
