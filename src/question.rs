//! Question length rules shared by the draft box and the ask proxy
//!
//! Lengths are counted in UTF-16 code units, the unit a browser's
//! `maxLength` uses, so a question accepted by the page is accepted here.

use thiserror::Error;

/// Maximum question length, in UTF-16 code units
pub const MAX_QUESTION_UNITS: usize = 250;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("Missing 'question' in request body")]
    Missing,
    #[error("Question too long. Max {MAX_QUESTION_UNITS} characters.")]
    TooLong { units: usize },
}

/// Length of `text` in UTF-16 code units
pub fn units(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Validate a question exactly as received.
///
/// Whitespace is not trimmed: the proxy forwards what it was given.
pub fn validate(text: &str) -> Result<&str, QuestionError> {
    if text.is_empty() {
        return Err(QuestionError::Missing);
    }
    let units = units(text);
    if units > MAX_QUESTION_UNITS {
        return Err(QuestionError::TooLong { units });
    }
    Ok(text)
}

/// Longest prefix of `text` within `max_units`, cut on a character boundary
pub fn truncate(text: &str, max_units: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        used += ch.len_utf16();
        if used > max_units {
            return text.get(..idx).unwrap_or(text);
        }
    }
    text
}
