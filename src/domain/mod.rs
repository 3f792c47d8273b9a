//! src/domain/mod.rs

mod credential_fields;
mod login_context;
mod redirect_target;
mod username;

pub use credential_fields::{credential_fields, CredentialField, SelectOption};
pub use login_context::{AutocompleteSetting, LoginContext, LogoutStatus};
pub use redirect_target::RedirectTarget;
pub use username::Username;

/// Validation error for domain data
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("`{0}` is not a valid username.")]
    InvalidUsername(String),
    #[error("`{0}` is not a safe redirect target.")]
    UnsafeRedirect(String),
    #[error("`{0}` is not a configured region.")]
    UnknownRegion(String),
}
