use std::sync::Arc;

use log::{info, warn};

use crate::auth::{CredentialService, RegisterRequest, TokenPayload};
use crate::error::AppError;
use crate::models::{NewUser, User, UserCredentials};
use crate::store::UserStore;

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    credentials: Arc<CredentialService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, credentials: Arc<CredentialService>) -> Self {
        Self { users, credentials }
    }

    /// Creates a user from an already validated request.
    ///
    /// The password is hashed before the email is checked, so a taken email still costs
    /// one hash. The returned record includes the hash; callers strip it before responding.
    pub async fn register(&self, request: RegisterRequest) -> Result<UserCredentials, AppError> {
        let password_hash = self.credentials.hash(&request.password)?;

        if self
            .users
            .find_credentials_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateEmail);
        }

        // The store constraint catches registrations racing past the check above.
        let created = self
            .users
            .create(NewUser {
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                password_hash,
            })
            .await?;

        info!("registered user {}", created.user.id);
        Ok(created)
    }

    /// Verifies the credentials and issues a token carrying `{id, email}`.
    ///
    /// An unknown email and a wrong password fail identically with
    /// `AppError::InvalidCredentials`.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        let Some(credentials) = self.users.find_credentials_by_email(email).await? else {
            warn!("login rejected");
            return Err(AppError::InvalidCredentials);
        };

        if !self
            .credentials
            .verify(password, &credentials.password_hash)?
        {
            warn!("login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let user = credentials.into_user();
        let token = self.credentials.issue_token(&TokenPayload {
            id: user.id,
            email: user.email.clone(),
        })?;

        info!("user {} logged in", user.id);
        Ok((user, token))
    }
}
