/*!
 * Narration text segmentation.
 *
 * Splits free-form narration into caption-sized chunks without ever
 * cutting a sentence in half:
 * - whitespace runs (including newlines) collapse to a single space
 * - sentences end at a run of `.`, `!` or `?` followed by whitespace
 * - consecutive sentences are packed greedily up to the character limit
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default maximum characters per caption
pub const DEFAULT_MAX_CHARS_PER_SUBTITLE: usize = 100;

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// Terminal punctuation plus the whitespace after it stays with the sentence
static SENTENCE_END_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").unwrap());

/// Greedy, sentence-respecting text splitter
#[derive(Debug, Clone)]
pub struct TextSegmenter {
    max_chars_per_subtitle: usize,
}

impl Default for TextSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS_PER_SUBTITLE)
    }
}

impl TextSegmenter {
    pub fn new(max_chars_per_subtitle: usize) -> Self {
        Self { max_chars_per_subtitle }
    }

    pub fn max_chars_per_subtitle(&self) -> usize {
        self.max_chars_per_subtitle
    }

    /// Collapse whitespace runs to single spaces and trim both ends
    pub fn clean_text(text: &str) -> String {
        WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
    }

    /// Split cleaned text into sentences, punctuation and trailing space attached
    pub fn split_sentences(cleaned: &str) -> Vec<&str> {
        let mut sentences = Vec::new();
        let mut last = 0;

        for boundary in SENTENCE_END_REGEX.find_iter(cleaned) {
            sentences.push(&cleaned[last..boundary.end()]);
            last = boundary.end();
        }
        if last < cleaned.len() {
            sentences.push(&cleaned[last..]);
        }

        sentences
    }

    /// Split raw text into trimmed caption chunks.
    ///
    /// A sentence longer than the limit becomes its own oversized chunk.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let cleaned = Self::clean_text(text);
        if cleaned.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0;

        for sentence in Self::split_sentences(&cleaned) {
            let sentence_chars = sentence.chars().count();

            if buffer_chars + sentence_chars > self.max_chars_per_subtitle && !buffer.is_empty() {
                chunks.push(buffer.trim().to_string());
                buffer.clear();
                buffer_chars = 0;
            }

            buffer.push_str(sentence);
            buffer_chars += sentence_chars;
        }

        if !buffer.is_empty() {
            chunks.push(buffer.trim().to_string());
        }

        debug!(
            "Segmented {} chars into {} chunks (limit {})",
            cleaned.chars().count(),
            chunks.len(),
            self.max_chars_per_subtitle
        );

        chunks
    }
}
