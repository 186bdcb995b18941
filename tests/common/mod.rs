#![allow(dead_code)]

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;

use seatbook_server::db;
use seatbook_server::models::NewEvent;
use seatbook_server::services::{catalog, credentials, ledger};

/// A private in-memory database. One connection, kept alive for the whole
/// test, since every new connection would see an empty database.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

/// A file-backed database with several connections, for tests that need
/// bookings to really run side by side. Keep the `TempDir` alive.
pub async fn file_pool(max_connections: u32) -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("tickets.db").display());
    let pool = db::connect(&url, max_connections).await.unwrap();
    db::migrate(&pool).await.unwrap();
    (pool, dir)
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> i64 {
    credentials::register(pool, username, "password", false)
        .await
        .unwrap()
        .id
}

pub async fn create_event(pool: &SqlitePool, capacity: i64) -> i64 {
    let event = NewEvent {
        name: "Music Concert".to_string(),
        location: "City Arena".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 10, 5).unwrap(),
        total_seats: capacity,
        price: 499.0,
    };
    catalog::create_event(pool, &event).await.unwrap().id
}

pub async fn remaining_seats(pool: &SqlitePool, event_id: i64) -> i64 {
    catalog::find_event(pool, event_id)
        .await
        .unwrap()
        .unwrap()
        .total_seats
}

pub async fn ticket_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn assert_conserved(pool: &SqlitePool, event_id: i64, capacity: i64) {
    let remaining = remaining_seats(pool, event_id).await;
    let sold = ledger::seats_sold(pool, event_id).await.unwrap();
    assert!(remaining >= 0, "remaining seats went negative: {remaining}");
    assert_eq!(
        remaining + sold,
        capacity,
        "remaining {remaining} + sold {sold} != capacity {capacity}"
    );
}
