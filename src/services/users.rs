use std::sync::Arc;

use log::{debug, info};

use crate::error::AppError;
use crate::models::{UpdateUserRequest, User};
use crate::store::UserStore;

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("User with ID {} not found", id))
}

/// User lookups and profile maintenance.
///
/// No operation restricts a caller to their own record.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Re-reads the caller's record.
    pub async fn me(&self, caller: &User) -> Result<User, AppError> {
        self.get(caller, caller.id).await
    }

    pub async fn get(&self, caller: &User, id: i32) -> Result<User, AppError> {
        debug!("user {} reads user {}", caller.id, id);
        self.users.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn list(&self, caller: &User) -> Result<Vec<User>, AppError> {
        debug!("user {} lists users", caller.id);
        self.users.find_all().await
    }

    /// Changes first and/or last name. Email and password cannot be changed here.
    pub async fn update(
        &self,
        caller: &User,
        id: i32,
        changes: UpdateUserRequest,
    ) -> Result<User, AppError> {
        debug!("user {} updates user {}", caller.id, id);
        self.users
            .update_names(id, changes.first_name, changes.last_name)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes the user and, through the store, every task they own.
    pub async fn delete(&self, caller: &User, id: i32) -> Result<(), AppError> {
        if !self.users.delete(id).await? {
            return Err(not_found(id));
        }
        info!("user {} deleted user {}", caller.id, id);
        Ok(())
    }
}
