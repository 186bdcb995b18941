use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bookable occasion. `total_seats` is the remaining capacity and only
/// shrinks through the booking coordinator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub total_seats: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub total_seats: i64,
    pub price: f64,
}

/// Admin view of an event: what is left plus what has been sold.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventOverview {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub date: NaiveDate,
    pub total_seats: i64,
    pub price: f64,
    pub seats_sold: i64,
}
