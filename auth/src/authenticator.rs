use chrono::Duration;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::jwt::IssuedToken;
use crate::jwt::JwtError;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator around a configured codec.
    pub fn new(token_codec: TokenCodec) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - Identity claims to embed in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the hash is unreadable)
    /// * `Token` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &T,
    ) -> Result<IssuedToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.token_codec.issue(claims)?)
    }

    /// Issue a token without password verification.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn issue_token<T: Serialize>(&self, claims: &T) -> Result<IssuedToken, JwtError> {
        self.token_codec.issue(claims)
    }

    /// Validate a token and decode its claims.
    ///
    /// # Errors
    /// * `JwtError` - Signature, expiry or structure check failed
    pub fn validate_token<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        self.token_codec.decode(token)
    }

    /// Lifetime of tokens issued by [`Authenticator::authenticate`].
    pub fn token_ttl(&self) -> Duration {
        self.token_codec.ttl()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jsonwebtoken::Algorithm;
    use serde::Deserialize;

    use super::*;
    use crate::jwt::ManualClock;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        role: String,
    }

    fn authenticator() -> Authenticator {
        let codec = TokenCodec::new(
            b"test_secret_key_at_least_32_bytes!",
            Algorithm::HS256,
            Duration::days(30),
        )
        .expect("Failed to build codec");
        Authenticator::new(codec)
    }

    fn claims() -> TestClaims {
        TestClaims {
            sub: "user@example.com".to_string(),
            role: "member".to_string(),
        }
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let issued = authenticator
            .authenticate("my_password", &hash, &claims())
            .expect("Authentication failed");

        assert!(!issued.token.is_empty());

        let decoded: TestClaims = authenticator
            .validate_token(&issued.token)
            .expect("Token validation failed");
        assert_eq!(decoded, claims());
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, &claims());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_against_corrupt_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("my_password", "not-a-phc-string", &claims());
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_password("my_password", &hash));
        assert!(!authenticator.verify_password("my_password", crate::UNKNOWN_USER_HASH));
    }

    #[test]
    fn test_validate_after_ttl_is_expired() {
        let clock = Arc::new(ManualClock::starting_now());
        let codec = TokenCodec::new(
            b"test_secret_key_at_least_32_bytes!",
            Algorithm::HS256,
            Duration::days(30),
        )
        .unwrap()
        .with_clock(clock.clone());
        let authenticator = Authenticator::new(codec);

        let issued = authenticator.issue_token(&claims()).unwrap();
        clock.advance(authenticator.token_ttl());

        let result = authenticator.validate_token::<TestClaims>(&issued.token);
        assert_eq!(result, Err(JwtError::Expired));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token::<TestClaims>("invalid.token.here");
        assert!(result.is_err());
    }
}
