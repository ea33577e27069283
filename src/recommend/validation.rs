//! Input validation for reader descriptions.

use regex::Regex;
use std::sync::LazyLock;

/// Minimum number of characters (after trimming) worth analysing.
pub const MIN_INPUT_CHARS: usize = 3;

static LETTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-ZáéíóúÁÉÍÓÚñÑ]").expect("valid regex"));

/// Why an input was not analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    NoWords,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::TooShort => write!(f, "The input is too short to analyse."),
            Rejection::NoWords => write!(f, "Please enter a valid description with words."),
        }
    }
}

/// Check that a description has real content.
pub fn validate_input(text: &str) -> Result<(), Rejection> {
    if text.trim().chars().count() < MIN_INPUT_CHARS {
        return Err(Rejection::TooShort);
    }
    if !LETTER_RE.is_match(text) {
        return Err(Rejection::NoWords);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short() {
        assert_eq!(validate_input(""), Err(Rejection::TooShort));
        assert_eq!(validate_input("   ab   "), Err(Rejection::TooShort));
    }

    #[test]
    fn test_no_letters() {
        assert_eq!(validate_input("12345 !!"), Err(Rejection::NoWords));
        assert_eq!(validate_input("???"), Err(Rejection::NoWords));
    }

    #[test]
    fn test_accepts_spanish_letters() {
        assert!(validate_input("ñññ").is_ok());
        assert!(validate_input("amor").is_ok());
        assert!(validate_input("42 á").is_ok());
    }
}
