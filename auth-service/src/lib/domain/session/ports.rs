use async_trait::async_trait;
use auth::JwtError;

use crate::session::errors::CredentialStoreError;
use crate::session::errors::LoginError;
use crate::session::models::CredentialRecord;
use crate::session::models::EmailAddress;
use crate::session::models::LoginCommand;
use crate::session::models::LoginSuccess;
use crate::session::models::SessionClaims;

/// Port for session domain service operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// Signed token and the user's public profile
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Store` - Credential lookup failed
    /// * `Token` - Token generation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginSuccess, LoginError>;

    /// Decode a presented session token.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry or structure check failed
    fn verify_session(&self, token: &str) -> Result<SessionClaims, JwtError>;
}

/// Read access to stored credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Retrieve the credential record registered under an email address.
    ///
    /// # Returns
    /// Optional record (None if no user has this email)
    ///
    /// # Errors
    /// * `Unavailable` - No connection could be obtained
    /// * `Query` - The lookup itself failed
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<CredentialRecord>, CredentialStoreError>;
}
