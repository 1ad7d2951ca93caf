use async_trait::async_trait;
use sqlx::PgPool;

use super::{TaskStore, UserStore};
use crate::error::AppError;
use crate::models::task::TaskRow;
use crate::models::user::{UserCredentialsRow, UserRow};
use crate::models::{NewUser, Task, TaskStatus, User, UserCredentials};

const USER_COLUMNS: &str = "id, first_name, last_name, email, is_active";

const TASK_SELECT: &str = "SELECT t.id, t.status, t.title, t.description, t.is_active, \
     u.id AS user_id, u.first_name AS user_first_name, u.last_name AS user_last_name, \
     u.email AS user_email, u.is_active AS user_is_active";

/// `sqlx`-backed store over the `users` and `tasks` tables (see `migrations/`).
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self::new(pool))
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(&format!(
            "SELECT {}, password FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserCredentials::from))
    }

    async fn create(&self, new_user: NewUser) -> Result<UserCredentials, AppError> {
        let result = sqlx::query_as::<_, UserCredentialsRow>(&format!(
            "INSERT INTO users (first_name, last_name, email, password) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {}, password",
            USER_COLUMNS
        ))
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }

    async fn update_names(
        &self,
        id: i32,
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users \
             SET first_name = COALESCE($1, first_name), last_name = COALESCE($2, last_name) \
             WHERE id = $3 \
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(first_name)
        .bind(last_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        // tasks.user_id is ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create(
        &self,
        owner_id: i32,
        title: String,
        description: String,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "WITH t AS ( \
                 INSERT INTO tasks (user_id, title, description, status) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING * \
             ) {} FROM t JOIN users u ON u.id = t.user_id",
            TASK_SELECT
        ))
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        let rows = sqlx::query_as::<_, TaskRow>(&format!(
            "{} FROM tasks t JOIN users u ON u.id = t.user_id ORDER BY t.id",
            TASK_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "{} FROM tasks t JOIN users u ON u.id = t.user_id WHERE t.id = $1",
            TASK_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn update_status(&self, id: i32, status: TaskStatus) -> Result<Option<Task>, AppError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!(
            "WITH t AS ( \
                 UPDATE tasks SET status = $1 WHERE id = $2 RETURNING * \
             ) {} FROM t JOIN users u ON u.id = t.user_id",
            TASK_SELECT
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Task::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
