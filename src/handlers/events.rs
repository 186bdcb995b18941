use axum::extract::State;
use axum::response::Response;

use crate::services::catalog;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::Path;
use crate::utils::response::success;

pub async fn list_events(State(state): State<AppState>) -> Result<Response, AppError> {
    let events = catalog::list_events(&state.db).await?;
    Ok(success(events, "Events retrieved"))
}

pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Response, AppError> {
    let event = catalog::find_event(&state.db, event_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id '{event_id}' was not found")))?;
    Ok(success(event, "Event retrieved"))
}
