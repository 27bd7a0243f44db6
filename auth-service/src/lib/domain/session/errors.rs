use auth::AuthenticationError;
use auth::JwtError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Failure talking to the credential store.
#[derive(Debug, Clone, Error)]
pub enum CredentialStoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    #[error("Credential query failed: {0}")]
    Query(String),
}

/// Outcome of a login attempt that did not produce a session.
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    /// Unknown email or wrong password; the two are deliberately not told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Store error: {0}")]
    Store(#[from] CredentialStoreError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),
}

impl From<AuthenticationError> for LoginError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => LoginError::InvalidCredentials,
            AuthenticationError::Token(e) => LoginError::Token(e),
        }
    }
}
