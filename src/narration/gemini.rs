//! Gemini text-completion client for narration generation.
//!
//! Wraps the generateContent endpoint: one prompt in, one free-text
//! completion out, followed by [`normalize`] so callers only ever see
//! emission-safe narration text.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use super::normalize::normalize;

/// Default Gemini model for narration generation
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Bounded timeout for a single generation request
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures from the text-generation collaborator.
///
/// These are tagged results, never folded into the narration string, so a
/// failed generation can never be forwarded to speech synthesis as text.
#[derive(Debug, Error)]
pub enum NarrationError {
    #[error("Failed to reach the text generation service: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Text generation failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Text generation response contained no completion text")]
    EmptyCompletion,
}

/// Client for the Gemini generateContent API
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate a cleaned narration script from a raw transcript.
    ///
    /// The returned string has already been through [`normalize`]; it may
    /// be empty if the model produced nothing but preamble.
    pub async fn generate_narration(&self, raw_text: &str) -> Result<String, NarrationError> {
        let prompt = build_prompt(raw_text);
        let url = format!("{}/{}:generateContent", GEMINI_BASE_URL, self.model);

        info!("Requesting narration script from {}", self.model);

        let response = self
            .http
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("key", self.api_key.as_str())])
            .json(&serde_json::json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read error response: {}", e));
            return Err(NarrationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let completion =
            first_completion_text(&parsed).ok_or(NarrationError::EmptyCompletion)?;

        let narration = normalize(completion);
        debug!("Generated narration ({} chars)", narration.len());

        Ok(narration)
    }
}

/// Pick the first non-blank completion text from the response
fn first_completion_text(response: &GenerateContentResponse) -> Option<&str> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
        .filter_map(|part| part.text.as_deref())
        .find(|text| !text.trim().is_empty())
}

/// Build the instructional prompt around the raw transcript
fn build_prompt(raw_text: &str) -> String {
    format!(
        "You are an AI that converts messy raw speech transcripts\n\
         into structured product demo narration.\n\
         \n\
         RAW INPUT:\n\
         {raw_text}\n\
         \n\
         OUTPUT RULES:\n\
         - ONLY output the structured text itself.\n\
         - DO NOT include any introductory or concluding text (e.g., \"Here is the text\").\n\
         - Add correct punctuation.\n\
         - Remove filler words.\n\
         - Keep narration concise and professional.\n\
         - Keep action sequence IDENTICAL.\n\
         - No hallucinated UI elements.\n\
         - Single continuous paragraph.\n\
         - NO newline characters at all.\n\
         - Maintain similar character length.\n\
         \n\
         FINAL OUTPUT:"
    )
}
