//! Shared infrastructure for the identity platform
//!
//! Provides PostgreSQL connectivity (configuration, pooling, health
//! checks) and the infrastructure error taxonomy used by the identity
//! service.

pub mod database;
pub mod error;
