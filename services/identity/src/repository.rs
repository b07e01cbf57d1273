//! User repository
//!
//! Persistence boundary for accounts: validates input, delegates hashing,
//! and translates entity operations into store queries and writes. The
//! repository holds no state between calls other than the store handle
//! and is safe to clone across concurrent callers.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{IdentityError, IdentityResult};
use crate::models::{NewUser, Role, UpdateUser, User, UserChanges};
use crate::password;
use crate::store::UserStore;
use crate::validation::{validate_email, validate_username};

/// Repository over the abstract user store
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
}

impl UserRepository {
    /// Create a repository over a store handle
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Create a new account
    ///
    /// The existence pre-checks are a fast path for error reporting;
    /// username collisions are reported before email collisions. The
    /// store's uniqueness constraint is the actual guarantee, and a
    /// violation that races past the pre-check surfaces as the same
    /// duplicate error.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> IdentityResult<User> {
        info!("Creating new user: {}", username);

        validate_username(username).map_err(IdentityError::Validation)?;
        validate_email(email).map_err(IdentityError::Validation)?;

        if self.store.find_by_username(username).await?.is_some() {
            return Err(IdentityError::DuplicateUsername);
        }
        if self.store.find_by_email(email).await?.is_some() {
            return Err(IdentityError::DuplicateEmail);
        }

        let new_user = NewUser {
            username: username.to_string(),
            email: email.to_string(),
            role,
            password_hash: password::hash_password(password)?,
        };

        self.store.insert(&new_user).await
    }

    /// Look up an account by its identifier
    ///
    /// A malformed identifier is treated as not found.
    pub async fn get_by_id(&self, id: &str) -> IdentityResult<Option<User>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        self.store.find_by_id(id).await
    }

    /// Look up an account by exact username
    pub async fn get_by_username(&self, username: &str) -> IdentityResult<Option<User>> {
        self.store.find_by_username(username).await
    }

    /// Look up an account by exact email
    pub async fn get_by_email(&self, email: &str) -> IdentityResult<Option<User>> {
        self.store.find_by_email(email).await
    }

    /// Every stored account, order unspecified
    pub async fn list_all(&self) -> IdentityResult<Vec<User>> {
        self.store.find_all().await
    }

    /// Apply a partial update to an account
    ///
    /// Only the supplied fields change; a new password is re-hashed before
    /// storage. Returns `Ok(false)` for a malformed or unknown id and for
    /// an empty change set. A new email that collides with another account
    /// is rejected by the store's constraint as `DuplicateEmail`.
    pub async fn update(&self, id: &str, update: &UpdateUser) -> IdentityResult<bool> {
        if update.is_empty() {
            return Ok(false);
        }
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        info!("Updating user: {}", id);

        let password_hash = match &update.password {
            Some(password) => Some(password::hash_password(password)?),
            None => None,
        };
        let changes = UserChanges {
            email: update.email.clone(),
            role: update.role,
            password_hash,
        };

        self.store.update(id, &changes).await
    }

    /// Remove an account
    ///
    /// Returns `Ok(true)` iff a matching account existed and was removed;
    /// a malformed id is treated as not found.
    pub async fn delete(&self, id: &str) -> IdentityResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };

        info!("Deleting user: {}", id);
        self.store.delete(id).await
    }

    /// True iff the store holds at least one account
    pub async fn exists(&self) -> IdentityResult<bool> {
        Ok(self.store.count().await? > 0)
    }
}

/// Parse an opaque identifier, treating malformed input as absent
fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}
