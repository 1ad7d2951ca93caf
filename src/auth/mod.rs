pub mod credentials;
pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::User;

// Re-export necessary items
pub use credentials::CredentialService;
pub use extractors::CurrentUser;
pub use middleware::{authenticate, AuthGuard};
pub use token::{Claims, TokenPayload};

lazy_static! {
    static ref UPPERCASE: regex::Regex = regex::Regex::new(r"[A-Z]").unwrap();
    static ref LOWERCASE: regex::Regex = regex::Regex::new(r"[a-z]").unwrap();
    // ASCII digit, or anything outside the ASCII word characters.
    static ref DIGIT_OR_SYMBOL: regex::Regex = regex::Regex::new(r"[0-9]|[^A-Za-z0-9_]").unwrap();
}

/// Requires an ASCII uppercase letter, an ASCII lowercase letter, and a digit or symbol.
/// Non-ASCII characters count as symbols, never as letters.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if UPPERCASE.is_match(password)
        && LOWERCASE.is_match(password)
        && DIGIT_OR_SYMBOL.is_match(password)
    {
        return Ok(());
    }

    let mut error = ValidationError::new("password_strength");
    error.message =
        Some("Password must contain at least one symbol, number and uppercase letter".into());
    Err(error)
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Checked against the stored hash only; no policy is applied at login.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Stored exactly as given; lookups are case-sensitive.
    #[validate(email)]
    pub email: String,
    /// At least 6 characters, see [`validate_password_strength`].
    #[validate(length(min = 6), custom = "validate_password_strength")]
    pub password: String,
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user, without any credential material.
    pub user: User,
    /// The JWT to send back as `Authorization: Bearer <token>`.
    pub token: String,
}
