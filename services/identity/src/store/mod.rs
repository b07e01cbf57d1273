//! Persistence contract for user accounts
//!
//! The store is an abstract keyed collection with exact-match lookups,
//! partial updates, and a uniqueness constraint on `username` and `email`.
//! The constraint at this layer is the actual guarantee that two racing
//! inserts of the same username or email cannot both succeed; the
//! repository's pre-checks only improve error reporting.

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::IdentityResult;
use crate::models::{NewUser, User, UserChanges};

/// Port to the underlying document store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new account and return it with its assigned id
    ///
    /// Fails with `DuplicateUsername` or `DuplicateEmail` when the
    /// uniqueness constraint rejects the insert.
    async fn insert(&self, new_user: &NewUser) -> IdentityResult<User>;

    /// Exact-match lookup by identifier
    async fn find_by_id(&self, id: Uuid) -> IdentityResult<Option<User>>;

    /// Exact-match lookup by username
    async fn find_by_username(&self, username: &str) -> IdentityResult<Option<User>>;

    /// Exact-match lookup by email
    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<User>>;

    /// Every stored account, order unspecified
    async fn find_all(&self) -> IdentityResult<Vec<User>>;

    /// Apply the supplied fields to an account; true iff a row matched
    async fn update(&self, id: Uuid, changes: &UserChanges) -> IdentityResult<bool>;

    /// Remove an account; true iff a row was removed
    async fn delete(&self, id: Uuid) -> IdentityResult<bool>;

    /// Number of stored accounts
    async fn count(&self) -> IdentityResult<u64>;
}
