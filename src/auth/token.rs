use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// The identity carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub id: i32,
    pub email: String,
}

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's unique identifier.
    pub id: i32,
    /// The user's email at the time the token was issued.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// HMAC keys derived once from the configured secret, plus the token lifetime.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: chrono::Duration::seconds(ttl_secs),
        }
    }

    /// Signs a token for `payload` that expires after the configured lifetime.
    ///
    /// Returns `AppError::InternalServerError` if the expiry overflows or encoding fails.
    pub fn generate_token(&self, payload: &TokenPayload) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

        let claims = Claims {
            id: payload.id,
            email: payload.email.clone(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry and returns the embedded identity.
    ///
    /// Every failure collapses to `AppError::InvalidToken`; the underlying reason is only
    /// logged at debug level.
    pub fn verify_token(&self, token: &str) -> Result<TokenPayload, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| TokenPayload {
                id: data.claims.id,
                email: data.claims.email,
            })
            .map_err(|e| {
                log::debug!("rejected bearer token: {}", e);
                AppError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> TokenPayload {
        TokenPayload {
            id: 1,
            email: "a@b.com".to_string(),
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        let keys = TokenKeys::new("test_secret_for_gen_verify", 3600);
        let token = keys.generate_token(&payload()).unwrap();
        assert_eq!(keys.verify_token(&token).unwrap(), payload());
    }

    #[test]
    fn test_token_carries_only_identity_claims() {
        let keys = TokenKeys::new("test_secret_for_claims", 3600);
        let token = keys.generate_token(&payload()).unwrap();

        let mut validation = Validation::default();
        validation.validate_exp = false;
        let raw = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret("test_secret_for_claims".as_bytes()),
            &validation,
        )
        .unwrap();

        let mut keys_present: Vec<&str> = raw
            .claims
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys_present.sort_unstable();
        assert_eq!(keys_present, vec!["email", "exp", "iat", "id"]);
    }

    #[test]
    fn test_token_expiration() {
        let keys = TokenKeys::new("test_secret_for_expiration", 3600);
        let expiration = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(2))
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims_expired = Claims {
            id: 2,
            email: "late@example.com".to_string(),
            iat: expiration - 60,
            exp: expiration,
        };
        let expired_token = encode(
            &Header::default(),
            &claims_expired,
            &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            keys.verify_token(&expired_token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let issued = TokenKeys::new("key_before_restart", 3600)
            .generate_token(&payload())
            .unwrap();
        let rotated = TokenKeys::new("key_after_restart", 3600);
        assert!(matches!(
            rotated.verify_token(&issued),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_token_is_rejected_at_every_position() {
        let keys = TokenKeys::new("test_secret_for_tampering", 3600);
        let token = keys.generate_token(&payload()).unwrap();

        for (index, original) in token.char_indices() {
            let replacement = if original == 'A' { 'B' } else { 'A' };
            let mut tampered = token.clone();
            tampered.replace_range(index..index + 1, &replacement.to_string());

            assert!(
                matches!(keys.verify_token(&tampered), Err(AppError::InvalidToken)),
                "token accepted after changing position {}",
                index
            );
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        let keys = TokenKeys::new("test_secret_for_garbage", 3600);
        for garbage in ["", "not-a-jwt", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
            assert!(matches!(
                keys.verify_token(garbage),
                Err(AppError::InvalidToken)
            ));
        }
    }
}
