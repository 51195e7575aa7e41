//! Narration generation and cleanup.
//!
//! Turns a raw speech transcript into a polished single-paragraph
//! narration script: Gemini produces the draft, rule-based cleanup
//! makes it emission-safe.

pub mod gemini;
pub mod normalize;

pub use gemini::{GeminiClient, NarrationError};
