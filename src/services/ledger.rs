use sqlx::SqlitePool;

use crate::models::{Ticket, TicketSummary};

pub async fn tickets_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<TicketSummary>, sqlx::Error> {
    sqlx::query_as::<_, TicketSummary>(
        r#"SELECT t.id, t.event_id, e.name AS event_name, e.date AS event_date, t.seats
           FROM tickets t
           JOIN events e ON t.event_id = e.id
           WHERE t.user_id = ?
           ORDER BY t.id"#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_ticket(pool: &SqlitePool, ticket_id: i64) -> Result<Option<Ticket>, sqlx::Error> {
    sqlx::query_as::<_, Ticket>("SELECT id, user_id, event_id, seats FROM tickets WHERE id = ?")
        .bind(ticket_id)
        .fetch_optional(pool)
        .await
}

pub async fn seats_sold(pool: &SqlitePool, event_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COALESCE(SUM(seats), 0) FROM tickets WHERE event_id = ?")
        .bind(event_id)
        .fetch_one(pool)
        .await
}
