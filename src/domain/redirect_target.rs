//! src/domain/redirect_target.rs

use crate::domain::ValidationError;

/// A post-login destination that stays on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget(String);

impl AsRef<str> for RedirectTarget {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl RedirectTarget {
    /// Accept only local absolute paths: a single leading `/`, no
    /// scheme-relative `//` or `/\` prefix and no control characters.
    pub fn parse(s: String) -> Result<RedirectTarget, ValidationError> {
        let is_local_path = s.starts_with('/') && !s.starts_with("//") && !s.starts_with("/\\");
        let has_control_chars = s.chars().any(char::is_control);
        if is_local_path && !has_control_chars {
            Ok(Self(s))
        } else {
            Err(ValidationError::UnsafeRedirect(s))
        }
    }
}
