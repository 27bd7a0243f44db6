use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::IssuedToken;
use super::claims::SignedClaims;
use super::claims::VerifiedClaims;
use super::clock::Clock;
use super::clock::SystemClock;
use super::errors::JwtError;

/// Signs claims into time-limited JWTs and verifies them back.
///
/// Generic over the claims type so the service decides what identity it
/// carries. The codec owns `iat` and `exp`; expiry is checked against the
/// injected [`Clock`] with no leeway.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Create a codec from a shared secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC secret, loaded once at startup
    /// * `algorithm` - One of HS256, HS384, HS512
    /// * `ttl` - Lifetime applied to every token issued with [`TokenCodec::issue`]
    ///
    /// # Errors
    /// * `MissingSecret` - `secret` is empty
    /// * `UnsupportedAlgorithm` - `algorithm` is not an HMAC algorithm
    pub fn new(secret: &[u8], algorithm: Algorithm, ttl: Duration) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::MissingSecret);
        }

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            ttl,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the wall clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign `claims` with the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn issue<T: Serialize>(&self, claims: &T) -> Result<IssuedToken, JwtError> {
        self.issue_with_ttl(claims, self.ttl)
    }

    /// Sign `claims` so that they expire `ttl` after now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized
    pub fn issue_with_ttl<T: Serialize>(
        &self,
        claims: &T,
        ttl: Duration,
    ) -> Result<IssuedToken, JwtError> {
        let issued_at = self.clock.now();
        let expires_at = issued_at + ttl.num_seconds();

        let payload = SignedClaims {
            claims,
            iat: issued_at,
            exp: expires_at,
        };

        let token = encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verify signature and expiry, then return the caller claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with another key or algorithm
    /// * `Expired` - Current time is at or past `exp`
    /// * `Malformed` - Not a JWT, undecodable payload, or no `exp`
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against our own clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<VerifiedClaims<T>>(token, &self.decoding_key, &validation)?;

        if token_data.claims.is_expired(self.clock.now()) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims.claims)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::jwt::clock::ManualClock;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        sub: String,
        user_id: i64,
        role: String,
        full_name: String,
    }

    fn claims() -> TestClaims {
        TestClaims {
            sub: "a@x.com".to_string(),
            user_id: 7,
            role: "admin".to_string(),
            full_name: "Ada Lovelace".to_string(),
        }
    }

    fn codec_with_clock(clock: Arc<ManualClock>) -> TokenCodec {
        TokenCodec::new(SECRET, Algorithm::HS256, Duration::days(30))
            .expect("Failed to build codec")
            .with_clock(clock)
    }

    #[test]
    fn test_issue_and_decode() {
        let codec = TokenCodec::new(SECRET, Algorithm::HS256, Duration::days(30)).unwrap();

        let issued = codec.issue(&claims()).expect("Failed to issue token");
        assert_eq!(issued.token.split('.').count(), 3);
        assert_eq!(issued.expires_at - issued.issued_at, 30 * 24 * 60 * 60);

        let decoded: TestClaims = codec.decode(&issued.token).expect("Failed to decode");
        assert_eq!(decoded, claims());
    }

    #[test]
    fn test_decode_expired_at_boundary() {
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let codec = codec_with_clock(clock.clone());

        let issued = codec
            .issue_with_ttl(&claims(), Duration::hours(1))
            .expect("Failed to issue token");

        clock.advance(Duration::hours(1) - Duration::seconds(1));
        assert!(codec.decode::<TestClaims>(&issued.token).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(
            codec.decode::<TestClaims>(&issued.token),
            Err(JwtError::Expired)
        );
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let issuer = TokenCodec::new(
            b"secret1_at_least_32_bytes_long_key!",
            Algorithm::HS256,
            Duration::days(1),
        )
        .unwrap();
        let verifier = TokenCodec::new(
            b"secret2_at_least_32_bytes_long_key!",
            Algorithm::HS256,
            Duration::days(1),
        )
        .unwrap();

        let issued = issuer.issue(&claims()).unwrap();

        assert_eq!(
            verifier.decode::<TestClaims>(&issued.token),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_decode_with_other_algorithm_is_signature_error() {
        let issuer = TokenCodec::new(SECRET, Algorithm::HS512, Duration::days(1)).unwrap();
        let verifier = TokenCodec::new(SECRET, Algorithm::HS256, Duration::days(1)).unwrap();

        let issued = issuer.issue(&claims()).unwrap();

        assert_eq!(
            verifier.decode::<TestClaims>(&issued.token),
            Err(JwtError::InvalidSignature)
        );
    }

    #[test]
    fn test_decode_malformed_token() {
        let codec = TokenCodec::new(SECRET, Algorithm::HS256, Duration::days(1)).unwrap();

        assert!(matches!(
            codec.decode::<TestClaims>("invalid.token.here"),
            Err(JwtError::Malformed(_))
        ));
        assert!(matches!(
            codec.decode::<TestClaims>("not-a-jwt"),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_token_without_exp_is_malformed() {
        let codec = TokenCodec::new(SECRET, Algorithm::HS256, Duration::days(1)).unwrap();

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims(),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            codec.decode::<TestClaims>(&token),
            Err(JwtError::Malformed(_))
        ));
    }

    #[test]
    fn test_rejects_empty_secret() {
        let result = TokenCodec::new(b"", Algorithm::HS256, Duration::days(1));
        assert!(matches!(result, Err(JwtError::MissingSecret)));
    }

    #[test]
    fn test_rejects_asymmetric_algorithm() {
        let result = TokenCodec::new(SECRET, Algorithm::RS256, Duration::days(1));
        assert!(matches!(result, Err(JwtError::UnsupportedAlgorithm(_))));
    }
}
