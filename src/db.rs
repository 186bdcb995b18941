use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::models::NewEvent;
use crate::services::{catalog, credentials};

#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("seeding the admin account failed: {0}")]
    Seed(#[from] credentials::CredentialError),
}

/// Opens the pool, creating the database file if needed. Foreign keys are
/// switched on for every connection; writers queue on the busy timeout.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    info!("Migrations completed successfully.");
    Ok(())
}

pub fn sample_events() -> Vec<NewEvent> {
    let event = |name: &str, location: &str, (y, m, d): (i32, u32, u32), seats: i64, price: f64| {
        NewEvent {
            name: name.to_string(),
            location: location.to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            total_seats: seats,
            price,
        }
    };

    vec![
        event("Music Concert", "City Arena", (2025, 10, 5), 200, 499.0),
        event("Tech Talk", "Lecture Hall 3", (2025, 9, 20), 150, 0.0),
        event("Food Festival", "Central Park", (2025, 11, 1), 500, 99.0),
    ]
}

/// Seeds the sample catalog and the admin account on an empty database.
/// Returns whether anything was written.
pub async fn seed(pool: &SqlitePool, config: &Config) -> Result<bool, DbError> {
    if catalog::count_events(pool).await? > 0 {
        return Ok(false);
    }

    for event in sample_events() {
        catalog::create_event(pool, &event).await?;
    }

    match credentials::register(pool, &config.admin_username, &config.admin_password, true).await {
        Ok(_) | Err(credentials::CredentialError::UsernameTaken(_)) => {}
        Err(e) => return Err(e.into()),
    }

    info!(admin = %config.admin_username, "Seeded sample events and admin account");
    Ok(true)
}
