//! src/authentication/mod.rs

mod directory;
mod middleware;
mod password;

pub use directory::{StoredUser, UserDirectory};
pub use middleware::{reject_anonymous_users, reject_users_without_admin_role, ADMIN_ROLE};
pub use password::{compute_password_hash, validate_credentials, Credentials, CredentialsError};
