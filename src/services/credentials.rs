use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::auth::password;
use crate::models::User;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("username '{0}' is already registered")]
    UsernameTaken(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("database error")]
    Storage(#[from] sqlx::Error),
}

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash, is_admin FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

pub async fn register(
    pool: &SqlitePool,
    username: &str,
    password: &str,
    is_admin: bool,
) -> Result<User, CredentialError> {
    if find_by_username(pool, username).await?.is_some() {
        return Err(CredentialError::UsernameTaken(username.to_string()));
    }

    let password_hash = password::hash(password)
        .await
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

    let inserted = sqlx::query("INSERT INTO users (username, password_hash, is_admin) VALUES (?, ?, ?)")
        .bind(username)
        .bind(&password_hash)
        .bind(is_admin)
        .execute(pool)
        .await;

    let id = match inserted {
        Ok(result) => result.last_insert_rowid(),
        // a concurrent registration won the UNIQUE constraint
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            return Err(CredentialError::UsernameTaken(username.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = id, username, is_admin, "User registered");

    Ok(User {
        id,
        username: username.to_string(),
        password_hash,
        is_admin,
    })
}

/// Returns the user only when `password` matches the stored hash.
pub async fn verify_login(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<User>, CredentialError> {
    let Some(user) = find_by_username(pool, username).await? else {
        debug!(username, "Login for unknown user");
        return Ok(None);
    };

    let matches = password::verify(password, &user.password_hash)
        .await
        .map_err(|e| CredentialError::Hashing(e.to_string()))?;

    if matches {
        Ok(Some(user))
    } else {
        debug!(username, "Login with wrong password");
        Ok(None)
    }
}
