//! src/domain/username.rs

use crate::domain::ValidationError;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Username {
    /// Usernames are trimmed, non-empty, at most 255 graphemes and
    /// free of control characters.
    pub fn parse(s: String) -> Result<Username, ValidationError> {
        let trimmed = s.trim();
        let is_empty = trimmed.is_empty();
        let is_too_long = trimmed.graphemes(true).count() > 255;
        let has_control_chars = trimmed.chars().any(char::is_control);
        if is_empty || is_too_long || has_control_chars {
            Err(ValidationError::InvalidUsername(s))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }
}
