//! src/csrf.rs
//!
//! Anti-forgery token bound to the session. The token is rendered into the
//! login form and must come back unchanged with the POST.

use crate::error::{error_chain_fmt, DashResult};
use crate::session_state::TypedSession;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Form field carrying the token.
pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";
pub const CSRF_FAILURE_MESSAGE: &str = "CSRF verification failed. Request aborted.";
const CSRF_TOKEN_LENGTH: usize = 32;

#[derive(thiserror::Error)]
pub enum CsrfError {
    #[error("CSRF token missing.")]
    Missing,
    #[error("CSRF token incorrect.")]
    Mismatch,
}

impl std::fmt::Debug for CsrfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl AsRef<str> for CsrfToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl CsrfToken {
    /// Generate a random 32-characters-long case-sensitive token.
    pub fn generate() -> Self {
        let mut rng = thread_rng();
        Self(
            std::iter::repeat_with(|| rng.sample(Alphanumeric))
                .map(char::from)
                .take(CSRF_TOKEN_LENGTH)
                .collect(),
        )
    }

    /// Token of the session, creating one on first use.
    pub fn get_or_create(session: &TypedSession) -> DashResult<Self> {
        if let Some(token) = session.get_csrf_token()? {
            return Ok(Self(token));
        }
        Self::rotate(session)
    }

    /// Store a fresh token in the session, replacing the old one.
    pub fn rotate(session: &TypedSession) -> DashResult<Self> {
        let token = Self::generate();
        session.insert_csrf_token(token.as_ref())?;
        Ok(token)
    }
}

/// Compare without bailing out at the first differing byte.
fn tokens_match(expected: &str, candidate: &str) -> bool {
    let expected = expected.as_bytes();
    let candidate = candidate.as_bytes();
    expected.len() == candidate.len()
        && expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Check a submitted token against the one stored in the session.
pub fn verify_csrf_token(session: &TypedSession, submitted: Option<&str>) -> DashResult<()> {
    let submitted = submitted
        .filter(|s| !s.is_empty())
        .ok_or(CsrfError::Missing)?;
    match session.get_csrf_token()? {
        Some(expected) if tokens_match(&expected, submitted) => Ok(()),
        _ => Err(CsrfError::Mismatch.into()),
    }
}
