//! In-memory user store
//!
//! Backs tests and embedded use without a database. Uniqueness is checked
//! inside the map lock, so it provides the same constraint guarantee as
//! the PostgreSQL schema.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{IdentityError, IdentityResult};
use crate::models::{NewUser, User, UserChanges};
use crate::store::UserStore;

/// User store held in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new_user: &NewUser) -> IdentityResult<User> {
        let mut users = self.users.lock().await;

        // Constraint check and insert happen under the same lock, so two
        // racing inserts of the same username or email cannot both pass
        if users.values().any(|u| u.username == new_user.username) {
            return Err(IdentityError::DuplicateUsername);
        }
        if users.values().any(|u| u.email == new_user.email) {
            return Err(IdentityError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            password_hash: new_user.password_hash.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> IdentityResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> IdentityResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<User>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> IdentityResult<Vec<User>> {
        let users = self.users.lock().await;
        Ok(users.values().cloned().collect())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> IdentityResult<bool> {
        let mut users = self.users.lock().await;

        if let Some(email) = &changes.email {
            if users.values().any(|u| u.id != id && u.email == *email) {
                return Err(IdentityError::DuplicateEmail);
            }
        }

        let Some(user) = users.get_mut(&id) else {
            return Ok(false);
        };

        if let Some(email) = &changes.email {
            user.email = email.clone();
        }
        if let Some(role) = changes.role {
            user.role = role;
        }
        if let Some(password_hash) = &changes.password_hash {
            user.password_hash = password_hash.clone();
        }

        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> IdentityResult<bool> {
        let mut users = self.users.lock().await;
        Ok(users.remove(&id).is_some())
    }

    async fn count(&self) -> IdentityResult<u64> {
        let users = self.users.lock().await;
        Ok(users.len() as u64)
    }
}
