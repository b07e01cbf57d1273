//! Default admin bootstrap
//!
//! Seeds a single well-known administrative account when the store is
//! empty. The initial password is deliberately well-known: operators must
//! rotate it after first login.

use tracing::{info, warn};

use crate::models::Role;
use crate::repository::UserRepository;

/// Username of the seeded admin account
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
/// Email of the seeded admin account
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@cashrecon.com";
/// Initial password of the seeded admin account; rotation after first
/// login is a mandatory operational step
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Create the default admin account if no accounts exist
///
/// Returns true iff a new account was created. Never panics and never
/// aborts startup: store failures and a concurrent creation that wins the
/// race are logged and reported as false. The uniqueness constraint in
/// the store is the backstop against a duplicate admin.
pub async fn ensure_default_admin(repository: &UserRepository) -> bool {
    match repository.exists().await {
        Ok(true) => return false,
        Ok(false) => {}
        Err(e) => {
            warn!("Skipping default admin bootstrap, store check failed: {}", e);
            return false;
        }
    }

    match repository
        .create(
            DEFAULT_ADMIN_USERNAME,
            DEFAULT_ADMIN_EMAIL,
            DEFAULT_ADMIN_PASSWORD,
            Role::Admin,
        )
        .await
    {
        Ok(_) => {
            info!(
                "Default admin user created: {} / {}",
                DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_EMAIL
            );
            warn!("Default admin uses the well-known initial password; change it after first login");
            true
        }
        Err(e) => {
            warn!("Failed to create default admin: {}", e);
            false
        }
    }
}
