//! Salted, deliberately slow password hashing.

mod argon2;
mod errors;

pub use self::argon2::PasswordHasher;
pub use self::argon2::UNKNOWN_USER_HASH;
pub use errors::PasswordError;
