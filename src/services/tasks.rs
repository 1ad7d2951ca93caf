use std::sync::Arc;

use log::{debug, info};

use crate::error::AppError;
use crate::models::{CreateTaskRequest, Task, TaskStatus, User};
use crate::store::TaskStore;

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Task with ID {} not found", id))
}

/// Task operations. Any authenticated caller may read, update or delete any task.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Creates an `OPEN` task owned by `caller`.
    pub async fn create(&self, caller: &User, request: CreateTaskRequest) -> Result<Task, AppError> {
        let task = self
            .tasks
            .create(
                caller.id,
                request.title,
                request.description,
                TaskStatus::Open,
            )
            .await?;
        info!("user {} created task {}", caller.id, task.id);
        Ok(task)
    }

    pub async fn list(&self, caller: &User) -> Result<Vec<Task>, AppError> {
        debug!("user {} lists tasks", caller.id);
        self.tasks.find_all().await
    }

    pub async fn get(&self, caller: &User, id: i32) -> Result<Task, AppError> {
        debug!("user {} reads task {}", caller.id, id);
        self.tasks.find_by_id(id).await?.ok_or_else(|| not_found(id))
    }

    /// Sets the status. Every transition is allowed, including to the current status.
    pub async fn update_status(
        &self,
        caller: &User,
        id: i32,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        debug!("user {} sets task {} to {:?}", caller.id, id, status);
        self.tasks
            .update_status(id, status)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, caller: &User, id: i32) -> Result<(), AppError> {
        if !self.tasks.delete(id).await? {
            return Err(not_found(id));
        }
        info!("user {} deleted task {}", caller.id, id);
        Ok(())
    }
}
