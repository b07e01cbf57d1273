//! PostgreSQL-backed user store

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{IdentityError, IdentityResult};
use crate::models::{NewUser, User, UserChanges};
use crate::store::UserStore;

/// User store backed by a PostgreSQL connection pool
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> DatabaseResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))
    }
}

/// Map a row from the users table into the entity
fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        // Unrecognized role values fall back to the default role
        role: row.get::<String, _>("role").parse().unwrap_or_default(),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

/// Classify a unique-violation by the constraint that rejected the write
fn duplicate_for_constraint(constraint: Option<&str>) -> IdentityError {
    match constraint {
        Some(name) if name.contains("email") => IdentityError::DuplicateEmail,
        _ => IdentityError::DuplicateUsername,
    }
}

/// Map a failed write into the identity error taxonomy
///
/// Unique-violations that raced past the repository's pre-check surface as
/// the same duplicate errors the pre-check would have reported.
fn map_write_error(error: sqlx::Error) -> IdentityError {
    let violated = match error.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => Some(db_err.constraint().map(str::to_owned)),
        _ => None,
    };

    match violated {
        Some(constraint) => duplicate_for_constraint(constraint.as_deref()),
        None => IdentityError::StoreUnavailable(DatabaseError::Query(error)),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, new_user: &NewUser) -> IdentityResult<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, role, password_hash, created_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(new_user.role.as_str())
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(user_from_row(&row))
    }

    async fn find_by_id(&self, id: Uuid) -> IdentityResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, role, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_username(&self, username: &str) -> IdentityResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, role, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, role, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn find_all(&self) -> IdentityResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, role, password_hash, created_at
            FROM users
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    async fn update(&self, id: Uuid, changes: &UserChanges) -> IdentityResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                role = COALESCE($3, role),
                password_hash = COALESCE($4, password_hash)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.email.as_deref())
        .bind(changes.role.map(|r| r.as_str()))
        .bind(changes.password_hash.as_deref())
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> IdentityResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> IdentityResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        let count: i64 = row.get("count");
        Ok(count as u64)
    }
}
