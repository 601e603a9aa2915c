//! Topic validation and sanitization
//!
//! The sanitized topic is interpolated into the generation prompt, so the
//! character set is bounded before anything leaves the process.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;

/// Maximum topic length in characters, checked before sanitization.
pub const MAX_TOPIC_CHARS: usize = 200;

static DISALLOWED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s\-.,!?()']").expect("static topic regex"));

/// A topic that passed validation: non-empty, trimmed, allow-listed characters only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic(String);

impl Topic {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validate and sanitize a raw topic.
///
/// Characters outside word characters, whitespace and `- . , ! ? ( ) '` are
/// removed, then the result is trimmed.
pub fn validate_topic(raw: Option<&str>) -> Result<Topic, ValidationError> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ValidationError::Empty),
    };

    if raw.chars().count() > MAX_TOPIC_CHARS {
        return Err(ValidationError::TooLong {
            max: MAX_TOPIC_CHARS,
        });
    }

    let sanitized = DISALLOWED_CHARS.replace_all(raw, "");
    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::NoValidCharacters);
    }

    Ok(Topic(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_topics_pass_through() {
        assert_eq!(validate_topic(Some("Python")).unwrap().as_str(), "Python");
        assert_eq!(
            validate_topic(Some("Machine Learning")).unwrap().as_str(),
            "Machine Learning"
        );
        assert_eq!(
            validate_topic(Some("What's new in C-sharp (v12), really?!")).unwrap().as_str(),
            "What's new in C-sharp (v12), really?!"
        );
        assert_eq!(validate_topic(Some("  JavaScript  ")).unwrap().as_str(), "JavaScript");
    }

    #[test]
    fn test_disallowed_characters_are_stripped_in_order() {
        assert_eq!(validate_topic(Some("AI & ML")).unwrap().as_str(), "AI  ML");

        let result = validate_topic(Some("Test<script>alert('xss')</script>")).unwrap();
        assert_eq!(result.as_str(), "Testscriptalert('xss')script");
        assert!(!result.as_str().contains('<'));
        assert!(!result.as_str().contains('>'));
        assert!(!result.as_str().contains('/'));
    }

    #[test]
    fn test_unicode_word_characters_are_kept() {
        assert_eq!(validate_topic(Some("Café crème")).unwrap().as_str(), "Café crème");
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        assert_eq!(validate_topic(None), Err(ValidationError::Empty));
        assert_eq!(validate_topic(Some("")), Err(ValidationError::Empty));
        assert_eq!(
            validate_topic(Some("   ")),
            Err(ValidationError::NoValidCharacters)
        );
        assert_eq!(
            validate_topic(Some("<<>>//&&")),
            Err(ValidationError::NoValidCharacters)
        );
    }

    #[test]
    fn test_length_bound() {
        let at_limit = "a".repeat(MAX_TOPIC_CHARS);
        assert_eq!(validate_topic(Some(&at_limit)).unwrap().as_str(), at_limit);

        let too_long = "a".repeat(MAX_TOPIC_CHARS + 1);
        let err = validate_topic(Some(&too_long)).unwrap_err();
        assert_eq!(err, ValidationError::TooLong { max: 200 });
        assert!(err.to_string().contains("200 characters"));
    }

    #[test]
    fn test_length_is_checked_before_sanitization() {
        let padded = format!("{}{}", "a".repeat(150), "&".repeat(51));
        assert!(matches!(
            validate_topic(Some(&padded)),
            Err(ValidationError::TooLong { .. })
        ));
    }
}
