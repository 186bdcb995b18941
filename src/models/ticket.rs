use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
    pub seats: i64,
}

/// Dashboard row: a ticket joined with the event it was booked for.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TicketSummary {
    pub id: i64,
    pub event_id: i64,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub seats: i64,
}
