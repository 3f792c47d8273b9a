//! src/session_state.rs

use crate::error::{error_chain_fmt, Error, DashResult};
use actix_session::{Session, SessionExt};
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    SessionInsertError(#[from] actix_session::SessionInsertError),
    #[error(transparent)]
    SessionGetError(#[from] actix_session::SessionGetError),
}

impl std::fmt::Debug for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Identity stored in the session after a successful login.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub username: String,
    pub domain: String,
    pub roles: Vec<String>,
    /// Identity endpoint picked on the login form, if regions are configured.
    #[serde(default)]
    pub region: Option<String>,
}

impl SessionUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Outcome of looking at the session of the current request.
#[derive(Debug)]
pub enum SessionCheck {
    Anonymous,
    /// The login is older than the session timeout; the session has been purged.
    Expired,
    Active(SessionUser),
}

pub struct TypedSession(Session);

impl TypedSession {
    const USER_KEY: &'static str = "user";
    const LOGIN_AT_KEY: &'static str = "login_at";
    const CSRF_TOKEN_KEY: &'static str = "csrf_token";

    pub fn renew(&self) {
        self.0.renew();
    }

    pub fn insert_user(&self, user: &SessionUser) -> DashResult<()> {
        self.0
            .insert(Self::USER_KEY, user)
            .map_err(SessionError::from)?;
        self.0
            .insert(Self::LOGIN_AT_KEY, chrono::Utc::now().timestamp())
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn get_user(&self) -> DashResult<Option<SessionUser>> {
        self.0
            .get(Self::USER_KEY)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    fn get_login_at(&self) -> DashResult<Option<i64>> {
        self.0
            .get(Self::LOGIN_AT_KEY)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    /// Resolve the session user, purging logins older than `timeout_seconds`.
    pub fn check_user(&self, timeout_seconds: u64) -> DashResult<SessionCheck> {
        let Some(user) = self.get_user()? else {
            return Ok(SessionCheck::Anonymous);
        };
        let login_at = self.get_login_at()?.unwrap_or_default();
        let elapsed = chrono::Utc::now().timestamp() - login_at;
        if elapsed < 0 || elapsed as u64 >= timeout_seconds {
            tracing::info!(username = %user.username, "Session timed out");
            self.0.purge();
            return Ok(SessionCheck::Expired);
        }
        Ok(SessionCheck::Active(user))
    }

    pub fn insert_csrf_token(&self, token: &str) -> DashResult<()> {
        self.0
            .insert(Self::CSRF_TOKEN_KEY, token)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn get_csrf_token(&self) -> DashResult<Option<String>> {
        self.0
            .get(Self::CSRF_TOKEN_KEY)
            .map_err(SessionError::from)
            .map_err(Error::from)
    }

    pub fn log_out(self) {
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    // We return the same error returned by the
    // implementation of `FromRequest` for `Session`.
    type Error = <Session as FromRequest>::Error;
    // No I/O happens here, so the session is wrapped into `Ready`
    // which resolves the first time it's polled by the executor.
    type Future = Ready<Result<TypedSession, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(TypedSession(req.get_session())))
    }
}
