use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::User;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Newly created, nobody is working on it yet.
    #[default]
    Open,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

/// Input structure for creating a task. The owner comes from the caller's identity.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Maximum length of 1000 characters.
    #[validate(length(max = 1000))]
    pub description: String,
}

/// Body of the status update endpoint. Any status may replace any other.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

/// A task with its owning user loaded, as returned by every task read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub user: User,
    pub status: TaskStatus,
    pub title: String,
    pub description: String,
    /// Stored and returned, not used by any operation.
    pub is_active: bool,
}

/// Row shape of `tasks` joined with `users`; owner columns carry a `user_` prefix.
#[derive(Debug, FromRow)]
pub struct TaskRow {
    pub id: i32,
    pub status: TaskStatus,
    pub title: String,
    pub description: String,
    pub is_active: bool,
    pub user_id: i32,
    pub user_first_name: String,
    pub user_last_name: String,
    pub user_email: String,
    pub user_is_active: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self {
            id: row.id,
            user: User {
                id: row.user_id,
                first_name: row.user_first_name,
                last_name: row.user_last_name,
                email: row.user_email,
                is_active: row.user_is_active,
            },
            status: row.status,
            title: row.title,
            description: row.description,
            is_active: row.is_active,
        }
    }
}
