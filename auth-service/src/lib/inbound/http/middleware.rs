use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::session::models::SessionClaims;
use crate::session::ports::SessionServicePort;

pub const NOT_AUTHENTICATED: &str = "Not authenticated";
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Extension type holding the identity decoded from the bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
    pub user_id: i64,
    pub role: String,
    pub full_name: String,
}

impl From<SessionClaims> for AuthenticatedUser {
    fn from(claims: SessionClaims) -> Self {
        Self {
            email: claims.sub,
            user_id: claims.user_id,
            role: claims.role,
            full_name: claims.full_name,
        }
    }
}

/// Middleware that validates the session token and adds the identity to request extensions
pub async fn authenticate<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticated_user(state.session_service.as_ref(), req.headers())?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Resolve the caller's identity from the `Authorization` header.
///
/// Every decode failure maps to the same 401 detail; the cause is only logged.
pub fn authenticated_user<SS: SessionServicePort>(
    session_service: &SS,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, ApiError> {
    let token = bearer_token(headers)?;

    let claims = session_service.verify_session(token).map_err(|e| {
        tracing::warn!(error = %e, "Session token rejected");
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })?;

    Ok(claims.into())
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let not_authenticated = || ApiError::Unauthorized(NOT_AUTHENTICATED.to_string());

    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(not_authenticated)?
        .to_str()
        .map_err(|_| not_authenticated())?;

    let (scheme, token) = header.split_once(' ').ok_or_else(not_authenticated)?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(not_authenticated());
    }

    Ok(token)
}
