use axum::extract::State;
use axum::response::Response;
use tracing::info;

use crate::auth::AdminUser;
use crate::models::NewEvent;
use crate::services::catalog;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::Json;
use crate::utils::response::{created, success};

pub async fn events_overview(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Response, AppError> {
    tracing::debug!(user_id = admin.user_id(), "Admin overview requested");
    let overview = catalog::events_overview(&state.db).await?;
    Ok(success(overview, "Events overview"))
}

fn validate(event: &NewEvent) -> Result<(), AppError> {
    if event.name.trim().is_empty() || event.location.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Event name and location are required".to_string(),
        ));
    }
    if event.total_seats < 0 {
        return Err(AppError::ValidationError(
            "Seat capacity cannot be negative".to_string(),
        ));
    }
    if !event.price.is_finite() || event.price < 0.0 {
        return Err(AppError::ValidationError(
            "Price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_event(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(body): Json<NewEvent>,
) -> Result<Response, AppError> {
    validate(&body)?;
    let event = catalog::create_event(&state.db, &body).await?;
    info!(event_id = event.id, user_id = admin.user_id(), "Event created");
    Ok(created(event, "Event created"))
}
