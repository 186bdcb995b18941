use sqlx::SqlitePool;

use crate::models::{Event, EventOverview, NewEvent};

pub async fn list_events(pool: &SqlitePool) -> Result<Vec<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "SELECT id, name, location, date, total_seats, price FROM events ORDER BY date, id",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_event(pool: &SqlitePool, event_id: i64) -> Result<Option<Event>, sqlx::Error> {
    sqlx::query_as::<_, Event>(
        "SELECT id, name, location, date, total_seats, price FROM events WHERE id = ?",
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await
}

pub async fn create_event(pool: &SqlitePool, event: &NewEvent) -> Result<Event, sqlx::Error> {
    let id = sqlx::query(
        "INSERT INTO events (name, location, date, total_seats, price) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&event.name)
    .bind(&event.location)
    .bind(event.date)
    .bind(event.total_seats)
    .bind(event.price)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(Event {
        id,
        name: event.name.clone(),
        location: event.location.clone(),
        date: event.date,
        total_seats: event.total_seats,
        price: event.price,
    })
}

pub async fn count_events(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(pool)
        .await
}

/// Every event with its remaining seats and the seats already sold.
pub async fn events_overview(pool: &SqlitePool) -> Result<Vec<EventOverview>, sqlx::Error> {
    sqlx::query_as::<_, EventOverview>(
        r#"SELECT e.id, e.name, e.location, e.date, e.total_seats, e.price,
                  COALESCE(SUM(t.seats), 0) AS seats_sold
           FROM events e
           LEFT JOIN tickets t ON t.event_id = e.id
           GROUP BY e.id
           ORDER BY e.date, e.id"#,
    )
    .fetch_all(pool)
    .await
}
