//! src/authentication/directory.rs

use crate::configuration::UserSettings;
use crate::domain::Username;
use anyhow::Context;
use secrecy::Secret;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct StoredUser {
    pub user_id: Uuid,
    pub username: String,
    pub domain: String,
    pub password_hash: Secret<String>,
    pub roles: Vec<String>,
}

/// Users allowed to log in, keyed by domain and username.
#[derive(Clone, Default, Debug)]
pub struct UserDirectory {
    users: HashMap<(String, String), StoredUser>,
}

impl UserDirectory {
    pub fn from_settings(users: &[UserSettings], default_domain: &str) -> anyhow::Result<Self> {
        let mut directory = Self::default();
        for user in users {
            let username = Username::parse(user.username.clone())
                .context("Invalid username in user configuration.")?;
            let domain = user
                .domain
                .clone()
                .unwrap_or_else(|| default_domain.to_string());
            let key = (domain.clone(), username.as_ref().to_string());
            if directory.users.contains_key(&key) {
                anyhow::bail!("User `{}` is configured twice in domain `{}`.", key.1, key.0);
            }
            directory.users.insert(
                key,
                StoredUser {
                    user_id: Uuid::new_v4(),
                    username: username.as_ref().to_string(),
                    domain,
                    password_hash: user.password_hash.clone(),
                    roles: user.roles.clone(),
                },
            );
        }
        if directory.is_empty() {
            tracing::warn!("No users configured, every login attempt will fail.");
        }
        Ok(directory)
    }

    pub fn lookup(&self, domain: &str, username: &Username) -> Option<&StoredUser> {
        self.users
            .get(&(domain.to_string(), username.as_ref().to_string()))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
