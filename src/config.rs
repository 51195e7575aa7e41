//! Credential loading from the environment.
//!
//! Missing keys are warned about once at load time and only become hard
//! errors when the dependent client is actually built.

use thiserror::Error;
use tracing::warn;

/// Environment variable holding the Gemini API key
const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";
/// Environment variable holding the Deepgram API key
const DEEPGRAM_KEY_VAR: &str = "DEEPGRAM_API_KEY";

#[derive(Debug, Error)]
#[error("Required credential {0} is not set")]
pub struct MissingCredential(pub &'static str);

/// Resolved credentials for both collaborators
#[derive(Debug, Clone, Default)]
pub struct Settings {
    gemini_api_key: Option<String>,
    deepgram_api_key: Option<String>,
}

impl Settings {
    /// Load credentials from the environment, warning about missing ones
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: read_key(GEMINI_KEY_VAR),
            deepgram_api_key: read_key(DEEPGRAM_KEY_VAR),
        }
    }

    /// Build settings directly, bypassing the environment
    pub fn with_keys(
        gemini_api_key: Option<String>,
        deepgram_api_key: Option<String>,
    ) -> Self {
        Self {
            gemini_api_key,
            deepgram_api_key,
        }
    }

    pub fn gemini_api_key(&self) -> Result<&str, MissingCredential> {
        self.gemini_api_key
            .as_deref()
            .ok_or(MissingCredential(GEMINI_KEY_VAR))
    }

    pub fn deepgram_api_key(&self) -> Result<&str, MissingCredential> {
        self.deepgram_api_key
            .as_deref()
            .ok_or(MissingCredential(DEEPGRAM_KEY_VAR))
    }
}

fn read_key(var: &'static str) -> Option<String> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => {
            warn!("{} not set - the dependent service will be unavailable", var);
            None
        }
    }
}
