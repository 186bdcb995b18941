use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::auth::session::{token_from_headers, Session};
use crate::state::AppState;
use crate::utils::error::AppError;

/// The logged-in caller, resolved from the session cookie.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub token: String,
    pub session: Session,
}

impl CurrentUser {
    pub fn user_id(&self) -> i64 {
        self.session.user_id
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)
            .ok_or_else(|| AppError::AuthError("Login required".to_string()))?;

        let session = state
            .sessions
            .get(&token)
            .await
            .ok_or_else(|| AppError::AuthError("Session expired or invalid".to_string()))?;

        Ok(Self { token, session })
    }
}

/// A logged-in caller whose account carries the admin flag.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.session.is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(Self(user))
    }
}
