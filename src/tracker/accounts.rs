//! Account registration and authentication

use crate::auth::{PasswordHasher, SaltedSha256};
use crate::traits::AccountStore;
use crate::types::*;
use crate::utils::validation;

/// Account manager handling registration and credential checks
pub struct AccountManager<S: AccountStore> {
    pub(crate) storage: S,
    hasher: Box<dyn PasswordHasher>,
}

impl<S: AccountStore> AccountManager<S> {
    /// Create a new account manager with the default salted hasher
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            hasher: Box::new(SaltedSha256),
        }
    }

    /// Create a new account manager with a custom password hasher
    pub fn with_hasher(storage: S, hasher: Box<dyn PasswordHasher>) -> Self {
        Self { storage, hasher }
    }

    /// Register a new user and return the assigned id.
    ///
    /// Both fields are trimmed before validation; the password is hashed
    /// before it ever reaches storage.
    pub async fn register(&mut self, username: &str, password: &str) -> TrackerResult<UserId> {
        let username = username.trim();
        let password = password.trim();

        validation::validate_username(username)?;
        validation::validate_password(password)?;

        let password_hash = self.hasher.hash(password);
        let id = self.storage.insert_user(username, &password_hash).await?;

        tracing::debug!(username, user_id = id, "registered new user");

        Ok(id)
    }

    /// Check credentials and return the matching user's id.
    ///
    /// Both fields are trimmed before the check, mirroring [`register`], so
    /// credentials stored trimmed still match input carrying surrounding
    /// whitespace. An unknown username and a wrong password both produce
    /// [`TrackerError::InvalidCredentials`]; callers cannot tell them apart.
    ///
    /// [`register`]: AccountManager::register
    pub async fn authenticate(&self, username: &str, password: &str) -> TrackerResult<UserId> {
        let username = username.trim();
        let password = password.trim();

        match self.storage.find_user(username).await? {
            Some(user) if self.hasher.verify(password, &user.password_hash) => Ok(user.id),
            _ => {
                tracing::warn!(username, "rejected login attempt");
                Err(TrackerError::InvalidCredentials)
            }
        }
    }
}
