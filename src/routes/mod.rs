use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, security_headers, Config};
use crate::handlers::{accounts, admin, bookings, events, health_check};
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/logout", post(accounts::logout))
        .route("/events", get(events::list_events))
        .route("/events/:event_id", get(events::get_event))
        .route("/events/:event_id/book", post(bookings::book))
        .route("/dashboard", get(bookings::dashboard))
        .route(
            "/admin/events",
            get(admin::events_overview).post(admin::create_event),
        )
        .with_state(state);

    security_headers(router, config.production)
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
