use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{CreateTaskRequest, UpdateTaskStatusRequest},
    state::AppState,
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use validator::Validate;

/// Retrieves every task, each with its owner.
///
/// The list is not scoped to the caller.
#[get("")]
pub async fn get_tasks(
    state: web::Data<AppState>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list(&current).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `title`: 1 to 200 characters.
/// - `description`: up to 1000 characters.
///
/// The task starts as `OPEN` and is owned by the caller.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `401 Unauthorized`: missing or invalid token.
/// - `422 Unprocessable Entity`: input validation failed.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    task_data: web::Json<CreateTaskRequest>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = state.tasks.create(&current, task_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a specific task by its ID.
///
/// ## Responses:
/// - `200 OK`: the task.
/// - `404 Not Found`: no task has this ID.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    task_id: web::Path<i32>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = state.tasks.get(&current, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Sets the status of a task.
///
/// Any status may follow any other. Ownership is not checked.
///
/// ## Responses:
/// - `200 OK`: the updated task.
/// - `404 Not Found`: no task has this ID.
/// - `422 Unprocessable Entity`: the status is not `OPEN`, `IN_PROGRESS` or `DONE`.
#[patch("/{id}/status")]
pub async fn update_task_status(
    state: web::Data<AppState>,
    task_id: web::Path<i32>,
    body: web::Json<UpdateTaskStatusRequest>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let task = state
        .tasks
        .update_status(&current, task_id.into_inner(), body.status)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task by its ID.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `404 Not Found`: no task has this ID.
#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    task_id: web::Path<i32>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    state.tasks.delete(&current, task_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
