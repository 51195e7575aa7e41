//! Speech synthesis: request shaping and the Deepgram client.

pub mod deepgram;
pub mod prepare;

pub use deepgram::{DeepgramClient, SynthesisError};
pub use prepare::{prepare, prepare_chunked};
