//! Truncating summarizer.
//!
//! Returns the input unchanged when it fits the bound. Otherwise cuts at the
//! last sentence terminator inside the bound, then at the last word boundary
//! with an ellipsis, then hard-truncates with an ellipsis. All cuts land on
//! UTF-8 character boundaries.

use crate::error::{MemoryError, Result};
use crate::summarizer::Summarizer;

const ELLIPSIS: &str = "...";

pub struct BasicSummarizer {
    max_summary_length: usize,
}

impl BasicSummarizer {
    pub fn new(max_summary_length: usize) -> Self {
        Self { max_summary_length }
    }
}

impl Summarizer for BasicSummarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Err(MemoryError::Summarizer("input text is empty".into()));
        }
        if text.len() <= self.max_summary_length {
            return Ok(text.to_string());
        }

        // Prefer ending on a complete sentence inside the bound.
        let head = &text[..floor_char_boundary(text, self.max_summary_length)];
        if let Some(idx) = head.rfind(['.', '?', '!']) {
            if idx > 0 {
                return Ok(text[..=idx].to_string());
            }
        }

        // No sentence boundary: cut at a word boundary, leaving room for the
        // ellipsis within the bound.
        let cut = self.max_summary_length.saturating_sub(ELLIPSIS.len());
        let head = &text[..floor_char_boundary(text, cut)];
        if let Some(idx) = head.rfind(' ') {
            if idx > 0 {
                return Ok(format!("{}{ELLIPSIS}", &text[..idx]));
            }
        }

        Ok(format!("{head}{ELLIPSIS}"))
    }
}

/// Largest byte index `<= index` that lands on a char boundary of `s`.
fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
