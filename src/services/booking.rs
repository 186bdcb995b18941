//! Seat inventory coordination.
//!
//! A booking is a guarded decrement of `events.total_seats` followed by the
//! ticket insert, both inside one transaction. The decrement carries its own
//! availability check in the `WHERE` clause, so two requests racing for the
//! same event are ordered by the database write lock and the loser sees zero
//! affected rows instead of a stale seat count.

use std::fmt;
use std::num::NonZeroU32;

use serde::Serialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    EventNotFound,
    InsufficientSeats,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::EventNotFound => f.write_str("event not found"),
            RejectionReason::InsufficientSeats => f.write_str("not enough seats available"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Seats were taken and a ticket with this id was written.
    Committed(i64),
    /// Nothing was changed.
    Rejected(RejectionReason),
}

impl BookingOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, BookingOutcome::Committed(_))
    }
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),
}

/// Reserve `seats` seats of `event_id` for `user_id`.
///
/// Either the ticket row and the seat decrement are committed together, or
/// the database is left exactly as it was.
pub async fn attempt_booking(
    pool: &SqlitePool,
    user_id: i64,
    event_id: i64,
    seats: NonZeroU32,
) -> Result<BookingOutcome, BookingError> {
    let mut tx = pool.begin().await?;

    // an early return drops `tx`, which rolls it back
    let outcome = reserve_in(&mut tx, user_id, event_id, seats)
        .await
        .map_err(|e| {
            error!(event_id, user_id, seats = seats.get(), error = ?e, "Booking aborted");
            e
        })?;

    match outcome {
        BookingOutcome::Committed(ticket_id) => {
            tx.commit().await?;
            info!(event_id, user_id, seats = seats.get(), ticket_id, "Booking committed");
        }
        BookingOutcome::Rejected(reason) => {
            tx.rollback().await?;
            info!(event_id, user_id, seats = seats.get(), %reason, "Booking rejected");
        }
    }

    Ok(outcome)
}

async fn reserve_in(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    event_id: i64,
    seats: NonZeroU32,
) -> Result<BookingOutcome, sqlx::Error> {
    let seats = i64::from(seats.get());

    let decremented = sqlx::query(
        "UPDATE events SET total_seats = total_seats - ?1 WHERE id = ?2 AND total_seats >= ?1",
    )
    .bind(seats)
    .bind(event_id)
    .execute(&mut **tx)
    .await?
    .rows_affected();

    if decremented == 0 {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM events WHERE id = ?")
            .bind(event_id)
            .fetch_optional(&mut **tx)
            .await?;

        let reason = match exists {
            Some(_) => RejectionReason::InsufficientSeats,
            None => RejectionReason::EventNotFound,
        };
        return Ok(BookingOutcome::Rejected(reason));
    }

    let ticket_id = sqlx::query("INSERT INTO tickets (user_id, event_id, seats) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(event_id)
        .bind(seats)
        .execute(&mut **tx)
        .await?
        .last_insert_rowid();

    Ok(BookingOutcome::Committed(ticket_id))
}
