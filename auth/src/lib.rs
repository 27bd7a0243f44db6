//! Session authentication primitives
//!
//! - Password hashing (Argon2id, PHC strings)
//! - Signed, time-limited session tokens (HMAC JWT)
//! - An authenticator that verifies a password and issues a token in one step
//!
//! Services own their claims type and their HTTP surface; this crate only
//! signs, verifies and hashes.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//! use jsonwebtoken::Algorithm;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Identity {
//!     sub: String,
//! }
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Algorithm::HS256, Duration::days(30)).unwrap();
//! let issued = codec.issue(&Identity { sub: "a@x.com".into() }).unwrap();
//! let decoded: Identity = codec.decode(&issued.token).unwrap();
//! assert_eq!(decoded.sub, "a@x.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use jwt::Clock;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::ManualClock;
pub use jwt::SystemClock;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::UNKNOWN_USER_HASH;
