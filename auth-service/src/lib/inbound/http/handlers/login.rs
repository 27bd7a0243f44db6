use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::session::errors::LoginError;
use crate::session::models::EmailAddress;
use crate::session::models::LoginCommand;
use crate::session::models::UserProfile;
use crate::session::ports::SessionServicePort;

pub const LOGIN_SUCCESSFUL: &str = "Login successful";
pub const WRONG_CREDENTIALS: &str = "Wrong email or password";
pub const LOGIN_ERROR: &str = "Login error: internal server error";

/// Credential check always answers 200; `success` tells the outcome.
pub async fn login<SS: SessionServicePort>(
    State(state): State<AppState<SS>>,
    Json(body): Json<LoginRequestBody>,
) -> ApiSuccess<LoginResponseData> {
    // A malformed email cannot match any record.
    let Ok(email) = EmailAddress::new(body.email) else {
        return ApiSuccess::new(StatusCode::OK, LoginResponseData::failure(WRONG_CREDENTIALS));
    };

    let data = match state
        .session_service
        .login(LoginCommand::new(email, body.password))
        .await
    {
        Ok(success) => LoginResponseData {
            success: true,
            message: LOGIN_SUCCESSFUL.to_string(),
            token: Some(success.access_token),
            user: Some(success.user.into()),
        },
        Err(LoginError::InvalidCredentials) => LoginResponseData::failure(WRONG_CREDENTIALS),
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            LoginResponseData::failure(LOGIN_ERROR)
        }
    };

    ApiSuccess::new(StatusCode::OK, data)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserData>,
}

impl LoginResponseData {
    fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            token: None,
            user: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub role: String,
    pub full_name: String,
}

impl From<UserProfile> for UserData {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.0,
            email: profile.email,
            role: profile.role,
            full_name: profile.full_name,
        }
    }
}
