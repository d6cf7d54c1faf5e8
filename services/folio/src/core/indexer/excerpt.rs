//! Search excerpt extraction.
//!
//! Turns a markdown body into the short plain-text excerpt that is
//! stored in the corpus and searched. Code is dropped entirely, link
//! and image syntax is removed, and the result is cut to a fixed
//! number of **characters** (never bytes, so multi-byte text is safe).

use once_cell::sync::Lazy;
use regex::Regex;

// Fenced blocks; an unterminated fence runs to the end of the body
static FENCED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```.*?(?:```|\z)|~~~.*?(?:~~~|\z)").unwrap());

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`\n]*`").unwrap());

static HEADING_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]{0,3}#{1,6}[ \t]+").unwrap());

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap());

static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());

static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\[\]()]").unwrap());

static NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").unwrap());

/// Builds search excerpts and reading-time estimates
#[derive(Debug, Clone)]
pub struct ExcerptBuilder {
    /// Characters kept in an excerpt
    max_chars: usize,

    /// Reading speed for the estimate
    words_per_minute: usize,
}

impl ExcerptBuilder {
    pub fn new(max_chars: usize, words_per_minute: usize) -> Self {
        Self {
            max_chars,
            words_per_minute: words_per_minute.max(1),
        }
    }

    /// Strip markup from `body` and keep the first `max_chars` characters
    pub fn excerpt(&self, body: &str) -> String {
        let text = FENCED_CODE.replace_all(body, "");
        let text = INLINE_CODE.replace_all(&text, "");
        let text = HEADING_MARKER.replace_all(&text, "");
        let text = IMAGE.replace_all(&text, "");
        let text = LINK.replace_all(&text, "$1");
        let text = BRACKETS.replace_all(&text, "");
        let text = NEWLINES.replace_all(&text, " ");

        text.chars().take(self.max_chars).collect()
    }

    /// Minutes needed to read the raw body, rounded up, at least one
    pub fn reading_time_minutes(&self, body: &str) -> u32 {
        let words = body.split_whitespace().count();
        let minutes = words.div_ceil(self.words_per_minute).max(1);
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}

impl Default for ExcerptBuilder {
    fn default() -> Self {
        Self::new(1000, 225)
    }
}
