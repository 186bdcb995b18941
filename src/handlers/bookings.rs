use std::num::NonZeroU32;

use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::services::booking::{attempt_booking, BookingOutcome};
use crate::services::ledger;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::{Json, Path};
use crate::utils::response::{created, success};

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub seats: i64,
}

#[derive(Debug, Serialize)]
struct BookingPayload {
    ticket_id: i64,
    event_id: i64,
    seats: u32,
}

fn seat_count(requested: i64) -> Result<NonZeroU32, AppError> {
    u32::try_from(requested)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| AppError::ValidationError("Seat count must be at least 1".to_string()))
}

pub async fn book(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(event_id): Path<i64>,
    Json(body): Json<BookingRequest>,
) -> Result<Response, AppError> {
    let seats = seat_count(body.seats)?;

    match attempt_booking(&state.db, user.user_id(), event_id, seats).await? {
        BookingOutcome::Committed(ticket_id) => Ok(created(
            BookingPayload {
                ticket_id,
                event_id,
                seats: seats.get(),
            },
            "Booking successful!",
        )),
        BookingOutcome::Rejected(reason) => Err(AppError::BookingRejected { event_id, reason }),
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Response, AppError> {
    let tickets = ledger::tickets_for_user(&state.db, user.user_id()).await?;
    Ok(success(tickets, format!("Tickets for {}", user.session.username)))
}
