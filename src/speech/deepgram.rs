//! Deepgram speech synthesis client.
//!
//! Sends shaped [`SynthesisRequest`]s to the speak endpoint and returns
//! raw audio bytes. Any non-success response is a hard failure carrying
//! the provider's status code and body; there is no retry.

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use super::prepare::SynthesisRequest;

const DEEPGRAM_SPEAK_URL: &str = "https://api.deepgram.com/v1/speak";

/// Bounded timeout for a single synthesis request
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Failed to reach the speech synthesis service: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Speech synthesis failed with status {status}: {body}")]
    Provider { status: u16, body: String },
}

/// Client for the Deepgram speak API
pub struct DeepgramClient {
    http: reqwest::Client,
    api_key: String,
}

impl DeepgramClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Synthesize one request into raw audio bytes
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, SynthesisError> {
        info!(
            "Sending synthesis request ({} chars, voice {})",
            request.text.len(),
            request.voice_model
        );

        let bit_rate = request.bit_rate.to_string();
        let response = self
            .http
            .post(DEEPGRAM_SPEAK_URL)
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", format!("Token {}", self.api_key))
            .query(&[
                ("model", request.voice_model.as_str()),
                ("encoding", request.encoding.as_str()),
                ("bit_rate", bit_rate.as_str()),
            ])
            .json(&serde_json::json!({ "text": request.text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("failed to read error response: {}", e));
            return Err(provider_error(status.as_u16(), body));
        }

        let audio = response.bytes().await?;
        info!("Received {} bytes of audio", audio.len());

        Ok(audio.to_vec())
    }

    /// Synthesize one payload per request, in the order given.
    ///
    /// Payloads come back in chunk order so downstream concatenation can
    /// rely on it. The first failure aborts the whole batch.
    pub async fn synthesize_chunks(
        &self,
        requests: &[SynthesisRequest],
    ) -> Result<Vec<Vec<u8>>, SynthesisError> {
        let mut payloads = Vec::with_capacity(requests.len());
        for request in requests {
            payloads.push(self.synthesize(request).await?);
        }
        Ok(payloads)
    }
}

fn provider_error(status: u16, body: String) -> SynthesisError {
    SynthesisError::Provider { status, body }
}
