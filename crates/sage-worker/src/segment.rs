//! Splits a token stream into speakable segments.
//!
//! The platform TTS sounds best when it receives whole clauses rather than
//! individual tokens or one giant reply. Tokens are buffered until a
//! sentence boundary or a size ceiling, then flushed as one segment.

/// Characters ending a speakable segment.
const BOUNDARY_CHARS: [char; 6] = ['.', '!', '?', ':', ';', '\n'];

/// Flush regardless of punctuation once the buffer reaches this size.
const DEFAULT_MAX_SEGMENT_CHARS: usize = 240;

#[derive(Debug)]
pub struct SpeechSegmenter {
    buffer: String,
    max_chars: usize,
}

impl Default for SpeechSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SEGMENT_CHARS)
    }
}

impl SpeechSegmenter {
    pub fn new(max_chars: usize) -> Self {
        Self {
            buffer: String::new(),
            max_chars: max_chars.max(1),
        }
    }

    /// Feeds a token, returning a segment when one is ready.
    pub fn push(&mut self, token: &str) -> Option<String> {
        self.buffer.push_str(token);

        if self.buffer.chars().count() >= self.max_chars
            || token.chars().any(|c| BOUNDARY_CHARS.contains(&c))
        {
            return self.flush();
        }

        None
    }

    /// Flushes whatever remains at end of stream.
    pub fn finish(&mut self) -> Option<String> {
        self.flush()
    }

    fn flush(&mut self) -> Option<String> {
        let segment = std::mem::take(&mut self.buffer);
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
