use serde::Deserialize;
use serde::Serialize;

/// Payload written into a token: caller claims plus the time window.
///
/// Caller claims are flattened next to `iat`/`exp`, so the claims type must
/// not define fields with those names itself.
#[derive(Debug, Serialize)]
pub(crate) struct SignedClaims<'a, T> {
    #[serde(flatten)]
    pub claims: &'a T,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Payload read back from a token whose signature already verified.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifiedClaims<T> {
    #[serde(flatten)]
    pub claims: T,

    pub exp: i64,
}

impl<T> VerifiedClaims<T> {
    /// A token stops being valid at the instant `now` reaches `exp`.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// A freshly signed token and the window it is valid for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: i64,
    pub expires_at: i64,
}
