use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{TokenKeys, TokenPayload};
use crate::config::Config;
use crate::error::AppError;

/// Password hashing and bearer token handling behind one handle.
///
/// Built once at startup from [`Config`] and shared read-only afterwards.
#[derive(Clone)]
pub struct CredentialService {
    bcrypt_cost: u32,
    keys: TokenKeys,
}

impl CredentialService {
    pub fn new(jwt_secret: &str, jwt_expires_in_secs: i64, bcrypt_cost: u32) -> Self {
        Self {
            bcrypt_cost,
            keys: TokenKeys::new(jwt_secret, jwt_expires_in_secs),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.jwt_expires_in_secs,
            config.bcrypt_cost,
        )
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        hash_password(plaintext, self.bcrypt_cost)
    }

    pub fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(plaintext, hash)
    }

    pub fn issue_token(&self, payload: &TokenPayload) -> Result<String, AppError> {
        self.keys.generate_token(payload)
    }

    /// Fails with `AppError::InvalidToken` for any malformed, forged or expired token.
    pub fn decode_and_verify(&self, token: &str) -> Result<TokenPayload, AppError> {
        self.keys.verify_token(token)
    }
}
