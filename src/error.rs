//! src/error.rs

use crate::csrf::CsrfError;
use crate::domain::ValidationError;
use crate::session_state::SessionError;
use actix_web::http::StatusCode;
use actix_web::ResponseError;

pub type DashResult<T> = Result<T, Error>;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error("Invalid credentials.")]
    ValidationError(#[from] ValidationError),
    #[error("Invalid credentials.")]
    AuthError(#[source] anyhow::Error),
    #[error("Unknown authentication method.")]
    UnknownAuthType(String),
    #[error(transparent)]
    SessionError(#[from] SessionError),
    #[error(transparent)]
    CsrfError(#[from] CsrfError),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) | Error::UnknownAuthType(_) => StatusCode::BAD_REQUEST,
            Error::AuthError(_) => StatusCode::UNAUTHORIZED,
            Error::CsrfError(_) => StatusCode::FORBIDDEN,
            Error::SessionError(_) | Error::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
