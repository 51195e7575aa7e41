//! End-to-end transcript-to-audio pipeline.
//!
//! Wires the narration stage to the synthesis stage: raw transcript in,
//! audio payload out. An empty narration produces an empty payload,
//! which is a valid "nothing to synthesize" result rather than an error.

use thiserror::Error;
use tracing::info;

use crate::config::{MissingCredential, Settings};
use crate::narration::{GeminiClient, NarrationError};
use crate::speech::{self, DeepgramClient, SynthesisError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Credential(#[from] MissingCredential),
    #[error(transparent)]
    Narration(#[from] NarrationError),
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}

pub struct Pipeline {
    gemini: GeminiClient,
    deepgram: DeepgramClient,
}

impl Pipeline {
    /// Build both collaborator clients from settings.
    ///
    /// This is where a missing credential finally becomes an error, not
    /// at settings load.
    pub fn from_settings(settings: &Settings) -> Result<Self, PipelineError> {
        let gemini = GeminiClient::new(settings.gemini_api_key()?);
        let deepgram = DeepgramClient::new(settings.deepgram_api_key()?);
        Ok(Self { gemini, deepgram })
    }

    /// Run the full pipeline: raw transcript to synthesized audio bytes
    pub async fn run(&self, raw_transcript: &str) -> Result<Vec<u8>, PipelineError> {
        let narration = self.gemini.generate_narration(raw_transcript).await?;
        info!("Narration ready ({} chars)", narration.len());

        let Some(request) = speech::prepare(&narration) else {
            info!("Narration is empty, skipping synthesis");
            return Ok(Vec::new());
        };

        let audio = self.deepgram.synthesize(&request).await?;
        Ok(audio)
    }

    /// Run the pipeline with one synthesis request per sentence.
    ///
    /// Payloads are returned in sentence order; concatenating them in
    /// that order reproduces the narration.
    pub async fn run_chunked(&self, raw_transcript: &str) -> Result<Vec<Vec<u8>>, PipelineError> {
        let narration = self.gemini.generate_narration(raw_transcript).await?;

        let requests = speech::prepare_chunked(&narration);
        if requests.is_empty() {
            info!("Narration is empty, skipping synthesis");
            return Ok(Vec::new());
        }

        info!("Synthesizing {} sentence chunks", requests.len());
        let payloads = self.deepgram.synthesize_chunks(&requests).await?;
        Ok(payloads)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential_fails_pipeline_construction() {
        let settings = Settings::with_keys(Some("g-key".to_string()), None);
        let err = match Pipeline::from_settings(&settings) {
            Ok(_) => panic!("pipeline built without a Deepgram key"),
            Err(e) => e,
        };
        assert!(matches!(err, PipelineError::Credential(_)));
        assert!(err.to_string().contains("DEEPGRAM_API_KEY"));
    }
}
