use crate::error::{Result, SearchError};

/// Word separator. Runs of it never produce empty tokens.
pub const SEPARATOR: char = ' ';

/// A token is valid when it has no control characters (code points below 0x20).
pub fn is_valid_word(text: &str) -> bool {
    !text.chars().any(|c| c < SEPARATOR)
}

/// Split text into tokens on ASCII space, preserving order.
pub fn tokenize(text: &str) -> Result<Vec<&str>> {
    if !is_valid_word(text) {
        return Err(SearchError::InvalidInput(text.to_string()));
    }
    Ok(text.split(SEPARATOR).filter(|w| !w.is_empty()).collect())
}
