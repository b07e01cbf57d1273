//! Identity and credential management core
//!
//! This crate owns the lifecycle of user accounts: creation, lookup,
//! mutation, and deletion. It enforces identity uniqueness, manages
//! secure password storage with argon2, and seeds a default admin
//! account on first startup.
//!
//! The session/HTTP layer consumes [`repository::UserRepository`] and the
//! entity-level [`models::User::verify_password`]; persistence is
//! abstracted behind the [`store::UserStore`] trait with PostgreSQL and
//! in-memory implementations.

pub mod bootstrap;
pub mod error;
pub mod models;
pub mod password;
pub mod repository;
pub mod store;
pub mod validation;

pub use bootstrap::ensure_default_admin;
pub use error::{IdentityError, IdentityResult};
pub use models::{NewUser, Role, UpdateUser, User, UserChanges};
pub use repository::UserRepository;
pub use store::{MemoryUserStore, PgUserStore, UserStore};
