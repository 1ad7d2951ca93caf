use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{NewUser, Task, TaskStatus, User, UserCredentials};

#[derive(Debug, Clone)]
struct TaskRecord {
    id: i32,
    owner_id: i32,
    status: TaskStatus,
    title: String,
    description: String,
    is_active: bool,
}

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i32, UserCredentials>,
    tasks: BTreeMap<i32, TaskRecord>,
    last_user_id: i32,
    last_task_id: i32,
}

impl Tables {
    fn hydrate(&self, record: &TaskRecord) -> Option<Task> {
        let owner = self.users.get(&record.owner_id)?;
        Some(Task {
            id: record.id,
            user: owner.user.clone(),
            status: record.status,
            title: record.title.clone(),
            description: record.description.clone(),
            is_active: record.is_active,
        })
    }
}

/// In-process store. Ids are assigned sequentially from 1, like a `SERIAL` column.
///
/// Email uniqueness is checked and the row inserted under a single write lock, so
/// concurrent registrations with the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|c| c.user.clone()))
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().map(|c| c.user.clone()).collect())
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|c| c.user.email == email)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<UserCredentials, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|c| c.user.email == new_user.email) {
            return Err(AppError::DuplicateEmail);
        }

        tables.last_user_id += 1;
        let credentials = UserCredentials {
            user: User {
                id: tables.last_user_id,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                email: new_user.email,
                is_active: true,
            },
            password_hash: new_user.password_hash,
        };
        tables
            .users
            .insert(credentials.user.id, credentials.clone());
        Ok(credentials)
    }

    async fn update_names(
        &self,
        id: i32,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(credentials) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(first_name) = first_name {
            credentials.user.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            credentials.user.last_name = last_name;
        }
        Ok(Some(credentials.user.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tasks.retain(|_, task| task.owner_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create(
        &self,
        owner_id: i32,
        title: String,
        description: String,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner_id) {
            // mirrors the foreign key on tasks.user_id
            return Err(AppError::DatabaseError(format!(
                "task owner {} does not exist",
                owner_id
            )));
        }

        tables.last_task_id += 1;
        let record = TaskRecord {
            id: tables.last_task_id,
            owner_id,
            status,
            title,
            description,
            is_active: true,
        };
        let task = tables
            .hydrate(&record)
            .ok_or_else(|| AppError::InternalServerError("task owner vanished".into()))?;
        tables.tasks.insert(record.id, record);
        Ok(task)
    }

    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .values()
            .filter_map(|record| tables.hydrate(record))
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.get(&id).and_then(|record| tables.hydrate(record)))
    }

    async fn update_status(&self, id: i32, status: TaskStatus) -> Result<Option<Task>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.tasks.get_mut(&id) else {
            return Ok(None);
        };
        record.status = status;
        let record = record.clone();
        Ok(tables.hydrate(&record))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.tasks.remove(&id).is_some())
    }
}
