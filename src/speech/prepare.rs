//! Shaping narration text into synthesis requests.
//!
//! Pure text transformation only: terminal punctuation enforcement,
//! sentence-level chunking and request parameterization. The network
//! call lives in the Deepgram client.

/// Voice used when the caller does not pick one
pub const DEFAULT_VOICE_MODEL: &str = "aura-2-thalia-en";

/// Bitrate for synthesized narration, low-bandwidth but fine for speech
pub const SPEECH_BIT_RATE: u32 = 32_000;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Audio encoding requested from the synthesis provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    Mp3,
}

impl AudioEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
        }
    }
}

/// A fully shaped request for the speech synthesis provider.
///
/// `text` is always non-empty and ends in a sentence terminator; use
/// [`prepare`] or [`prepare_with_voice`] to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_model: String,
    pub encoding: AudioEncoding,
    pub bit_rate: u32,
}

/// Collapse internal whitespace, trim, and guarantee the text ends in a
/// sentence terminator. Idempotent; empty input stays empty.
pub fn ensure_terminal_punctuation(text: &str) -> String {
    let mut out = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if let Some(last) = out.chars().last() {
        if !SENTENCE_TERMINATORS.contains(&last) {
            out.push('.');
        }
    }
    out
}

/// Split narration into sentence chunks.
///
/// A boundary is a sentence terminator followed by whitespace; the
/// terminator stays with the preceding sentence and the whitespace is
/// consumed. Fragments that trim to empty are dropped, order is
/// preserved and nothing is duplicated.
pub fn chunk_by_sentence(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut iter = text.char_indices().peekable();

    while let Some((idx, ch)) = iter.next() {
        if !SENTENCE_TERMINATORS.contains(&ch) {
            continue;
        }
        let at_boundary = matches!(iter.peek(), Some((_, next)) if next.is_whitespace());
        if at_boundary {
            let end = idx + ch.len_utf8();
            let chunk = text[start..end].trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        chunks.push(tail.to_string());
    }

    chunks
}

/// Shape a single-shot synthesis request using the default voice.
///
/// Returns `None` when the text trims to empty: blank narration issues
/// no request at all.
pub fn prepare(text: &str) -> Option<SynthesisRequest> {
    prepare_with_voice(text, DEFAULT_VOICE_MODEL)
}

/// Shape a single-shot synthesis request with an explicit voice
pub fn prepare_with_voice(text: &str, voice_model: &str) -> Option<SynthesisRequest> {
    if text.trim().is_empty() {
        return None;
    }

    Some(SynthesisRequest {
        text: ensure_terminal_punctuation(text),
        voice_model: voice_model.to_string(),
        encoding: AudioEncoding::Mp3,
        bit_rate: SPEECH_BIT_RATE,
    })
}

/// Shape one request per sentence chunk, preserving sentence order
pub fn prepare_chunked(text: &str) -> Vec<SynthesisRequest> {
    chunk_by_sentence(text)
        .iter()
        .filter_map(|chunk| prepare(chunk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_terminal_period() {
        assert_eq!(ensure_terminal_punctuation("Turn on the light"), "Turn on the light.");
    }

    #[test]
    fn test_existing_terminators_kept() {
        assert_eq!(ensure_terminal_punctuation("Done!"), "Done!");
        assert_eq!(ensure_terminal_punctuation("Ready?"), "Ready?");
        assert_eq!(ensure_terminal_punctuation("Stop."), "Stop.");
    }

    #[test]
    fn test_terminal_punctuation_collapses_whitespace() {
        assert_eq!(
            ensure_terminal_punctuation("  Click   the\tbutton  "),
            "Click the button."
        );
    }

    #[test]
    fn test_terminal_punctuation_idempotent() {
        for text in ["Turn on the light", "Already done.", "  spaced   out  ", ""] {
            let once = ensure_terminal_punctuation(text);
            assert_eq!(ensure_terminal_punctuation(&once), once);
        }
    }

    #[test]
    fn test_terminal_punctuation_empty_stays_empty() {
        assert_eq!(ensure_terminal_punctuation(""), "");
        assert_eq!(ensure_terminal_punctuation("   "), "");
    }

    #[test]
    fn test_chunks_split_at_sentence_boundaries() {
        assert_eq!(
            chunk_by_sentence("Open settings. Toggle dark mode! Done?"),
            vec!["Open settings.", "Toggle dark mode!", "Done?"]
        );
    }

    #[test]
    fn test_chunks_keep_order_and_content() {
        let text = "First step.  Second step.   Third step.";
        let chunks = chunk_by_sentence(text);
        assert_eq!(chunks, vec!["First step.", "Second step.", "Third step."]);
        assert_eq!(chunks.join(" "), "First step. Second step. Third step.");
    }

    #[test]
    fn test_chunks_never_empty() {
        for text in ["", "   ", ".  .  .", "One. Two."] {
            for chunk in chunk_by_sentence(text) {
                assert!(!chunk.is_empty());
                assert_eq!(chunk, chunk.trim());
            }
        }
    }

    #[test]
    fn test_single_sentence_without_terminator() {
        assert_eq!(chunk_by_sentence("no punctuation here"), vec!["no punctuation here"]);
    }

    #[test]
    fn test_terminator_without_following_whitespace_does_not_split() {
        assert_eq!(chunk_by_sentence("v1.2 is out. Install it."), vec![
            "v1.2 is out.",
            "Install it."
        ]);
    }

    #[test]
    fn test_prepare_blank_yields_no_request() {
        assert_eq!(prepare(""), None);
        assert_eq!(prepare("   "), None);
    }

    #[test]
    fn test_prepare_fills_fixed_parameters() {
        let request = prepare("Turn on the light").unwrap();
        assert_eq!(request.text, "Turn on the light.");
        assert_eq!(request.voice_model, DEFAULT_VOICE_MODEL);
        assert_eq!(request.encoding, AudioEncoding::Mp3);
        assert_eq!(request.bit_rate, 32_000);
    }

    #[test]
    fn test_prepare_with_voice_override() {
        let request = prepare_with_voice("Open the app", "aura-2-orion-en").unwrap();
        assert_eq!(request.voice_model, "aura-2-orion-en");
    }

    #[test]
    fn test_prepare_chunked_one_request_per_sentence() {
        let requests = prepare_chunked("Open settings. Toggle dark mode! Done?");
        let texts: Vec<&str> = requests.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Open settings.", "Toggle dark mode!", "Done?"]);
        assert!(requests.iter().all(|r| r.bit_rate == SPEECH_BIT_RATE));
    }

    #[test]
    fn test_prepare_chunked_blank_is_empty() {
        assert!(prepare_chunked("  ").is_empty());
    }
}
