use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::session::{expired_session_cookie, session_cookie};
use crate::auth::{CurrentUser, Session};
use crate::models::User;
use crate::services::credentials;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::Json;
use crate::utils::response::{created, empty_success, success};

const MAX_USERNAME_LEN: usize = 64;
const MAX_PASSWORD_LEN: usize = 128;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct AccountPayload {
    id: i64,
    username: String,
    is_admin: bool,
}

impl From<&User> for AccountPayload {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
        }
    }
}

fn validate(credentials: &Credentials) -> Result<&str, AppError> {
    let username = credentials.username.trim();
    if username.is_empty() || username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::ValidationError(format!(
            "Username must be between 1 and {MAX_USERNAME_LEN} characters"
        )));
    }
    if username.chars().any(char::is_control) {
        return Err(AppError::ValidationError(
            "Username contains invalid characters".to_string(),
        ));
    }
    if credentials.password.is_empty() || credentials.password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::ValidationError(format!(
            "Password must be between 1 and {MAX_PASSWORD_LEN} bytes"
        )));
    }
    Ok(username)
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Response, AppError> {
    let username = validate(&body)?;
    let user = credentials::register(&state.db, username, &body.password, false).await?;

    Ok(created(
        AccountPayload::from(&user),
        "Registration successful! Please log in.",
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<Credentials>,
) -> Result<Response, AppError> {
    let username = body.username.trim();

    let user = credentials::verify_login(&state.db, username, &body.password)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid credentials!".to_string()))?;

    let token = state.sessions.create(Session::from(&user)).await;
    info!(user_id = user.id, "Login successful");

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&token, state.sessions.ttl()))]),
        success(AccountPayload::from(&user), "Login successful!"),
    )
        .into_response())
}

pub async fn logout(State(state): State<AppState>, user: CurrentUser) -> Response {
    state.sessions.remove(&user.token).await;
    info!(user_id = user.user_id(), "Logged out");

    (
        AppendHeaders([(SET_COOKIE, expired_session_cookie())]),
        empty_success("You have been logged out."),
    )
        .into_response()
}
