//! Persistence seams for users and tasks.
//!
//! Services only see the [`UserStore`] and [`TaskStore`] traits. [`PgStore`] is the
//! production implementation; [`MemoryStore`] keeps everything in process and backs local
//! development and the test suite.
//!
//! Deleting a user also deletes that user's tasks in both implementations.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{NewUser, Task, TaskStatus, User, UserCredentials};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError>;

    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// The only read that selects the password hash.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError>;

    /// Fails with `AppError::DuplicateEmail` when the email is already taken.
    async fn create(&self, new_user: NewUser) -> Result<UserCredentials, AppError>;

    /// Returns `None` when no user has this id.
    async fn update_names(
        &self,
        id: i32,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Option<User>, AppError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(
        &self,
        owner_id: i32,
        title: String,
        description: String,
        status: TaskStatus,
    ) -> Result<Task, AppError>;

    async fn find_all(&self) -> Result<Vec<Task>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, AppError>;

    async fn update_status(&self, id: i32, status: TaskStatus) -> Result<Option<Task>, AppError>;

    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}
