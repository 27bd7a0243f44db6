use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::authenticated_user;
use crate::inbound::http::router::AppState;
use crate::session::ports::SessionServicePort;

pub const LOGOUT_SUCCESSFUL: &str = "Logout successful. Please remove token from client storage.";

/// Sessions live only in the client, so there is nothing to invalidate here.
///
/// A valid bearer token is used for logging only; missing or bad tokens
/// still get the acknowledgment.
pub async fn logout<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    headers: HeaderMap,
) -> ApiSuccess<LogoutResponseData> {
    if let Ok(user) = authenticated_user(state.session_service.as_ref(), &headers) {
        tracing::info!(user_id = user.user_id, "User logged out");
    }

    ApiSuccess::new(
        StatusCode::OK,
        LogoutResponseData {
            success: true,
            message: LOGOUT_SUCCESSFUL.to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub success: bool,
    pub message: String,
}
