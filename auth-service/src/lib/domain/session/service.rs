use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::JwtError;
use auth::UNKNOWN_USER_HASH;

use crate::session::errors::LoginError;
use crate::session::models::LoginCommand;
use crate::session::models::LoginSuccess;
use crate::session::models::SessionClaims;
use crate::session::models::UserProfile;
use crate::session::ports::CredentialRepository;
use crate::session::ports::SessionServicePort;

/// Domain service implementation for session operations.
///
/// Concrete implementation of SessionServicePort with dependency injection.
pub struct SessionService<CR>
where
    CR: CredentialRepository,
{
    repository: Arc<CR>,
    authenticator: Arc<Authenticator>,
}

impl<CR> SessionService<CR>
where
    CR: CredentialRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential lookup implementation
    /// * `authenticator` - Password verifier and token codec, configured at startup
    pub fn new(repository: Arc<CR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<CR> SessionServicePort for SessionService<CR>
where
    CR: CredentialRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginSuccess, LoginError> {
        let Some(record) = self.repository.find_by_email(&command.email).await? else {
            // Same Argon2 cost as a known email with a wrong password.
            self.authenticator
                .verify_password(&command.password, UNKNOWN_USER_HASH);
            tracing::debug!(email = %command.email, "Login attempt for unknown email");
            return Err(LoginError::InvalidCredentials);
        };

        let claims = SessionClaims::from(&record);
        let issued =
            self.authenticator
                .authenticate(&command.password, &record.password_hash, &claims)?;

        tracing::info!(
            user_id = %record.id,
            expires_at = issued.expires_at,
            "Session issued"
        );

        Ok(LoginSuccess {
            access_token: issued.token,
            user: UserProfile::from(record),
        })
    }

    fn verify_session(&self, token: &str) -> Result<SessionClaims, JwtError> {
        self.authenticator.validate_token(token)
    }
}
