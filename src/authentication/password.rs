//! src/authentication/password.rs

use crate::authentication::UserDirectory;
use crate::domain::Username;
use crate::error::error_chain_fmt;
use crate::session_state::SessionUser;
use crate::telemetry::spawn_blocking_with_tracing;
use anyhow::Context;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use secrecy::{ExposeSecret, Secret};

type CredsResult<T> = Result<T, CredentialsError>;

#[derive(thiserror::Error)]
pub enum CredentialsError {
    #[error("Username could not be found.")]
    UnknownUsername,
    #[error("Failed to verify password.")]
    PasswordVerifikationFailed(#[from] argon2::password_hash::Error),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

pub struct Credentials {
    pub username: Username,
    pub domain: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, directory))]
pub async fn validate_credentials(
    credentials: Credentials,
    directory: &UserDirectory,
) -> CredsResult<SessionUser> {
    let mut user: Option<SessionUser> = None;
    // Unknown users are verified against this hash as well, so that both
    // failure paths take the same time.
    let mut expected_password_hash = Secret::new(
        "$argon2id$v=19$m=15000,t=2,p=1$\
        gZiV/M1gPc22ElAH/Jh1Hw$\
        CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
            .to_string(),
    );
    if let Some(stored) = directory.lookup(&credentials.domain, &credentials.username) {
        user = Some(SessionUser {
            user_id: stored.user_id,
            username: stored.username.clone(),
            domain: stored.domain.clone(),
            roles: stored.roles.clone(),
            region: None,
        });
        expected_password_hash = stored.password_hash.clone();
    }

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;
    // user is only set to Some, if we found the user in the directory
    user.ok_or(CredentialsError::UnknownUsername)
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> CredsResult<()> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .context("Failed to parse hash in PHC string format.")?;
    Argon2::default().verify_password(
        password_candidate.expose_secret().as_bytes(),
        &expected_password_hash,
    )?;
    Ok(())
}

/// Argon2id PHC string for `password`, as stored in the user configuration.
pub fn compute_password_hash(password: Secret<String>) -> CredsResult<Secret<String>> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let params = Params::new(15_000, 2, 1, None).context("Invalid Argon2 parameters.")?;
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .context("Failed to hash password.")?
        .to_string();
    Ok(Secret::new(password_hash))
}
