//! User model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Role;
use crate::password;

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check a plaintext password against the stored digest
    ///
    /// A malformed or corrupted digest yields `false`, never an error.
    pub fn verify_password(&self, password: &str) -> bool {
        password::verify_password(password, &self.password_hash)
    }

    /// Check if the account has the admin role
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// New user insert payload, password already hashed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
}

/// Partial update request accepted by the repository
///
/// Only the supplied fields are applied; `password` is re-hashed before
/// storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
}

impl UpdateUser {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.role.is_none() && self.password.is_none()
    }
}

/// Store-level partial update, digest already computed
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
}

impl UserChanges {
    /// True when no field is supplied
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.role.is_none() && self.password_hash.is_none()
    }
}
