use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

pub const TOKEN_VALID: &str = "Token is valid";

/// Echo the identity the session guard attached to the request.
pub async fn verify(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<VerifyResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        VerifyResponseData {
            success: true,
            message: TOKEN_VALID.to_string(),
            user: user.into(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyResponseData {
    pub success: bool,
    pub message: String,
    pub user: VerifiedUserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedUserData {
    pub email: String,
    pub full_name: String,
    pub user_id: i64,
    pub role: String,
}

impl From<AuthenticatedUser> for VerifiedUserData {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            email: user.email,
            full_name: user.full_name,
            user_id: user.user_id,
            role: user.role,
        }
    }
}
