use crate::{auth::CurrentUser, error::AppError, models::UpdateUserRequest, state::AppState};
use actix_web::{delete, get, patch, web, HttpResponse, Responder};
use validator::Validate;

/// Returns the authenticated user.
#[get("/me")]
pub async fn get_me(
    state: web::Data<AppState>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let user = state.users.me(&current).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Lists every user.
#[get("")]
pub async fn get_users(
    state: web::Data<AppState>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let users = state.users.list(&current).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Retrieves a user by ID.
///
/// ## Responses:
/// - `200 OK`: the user.
/// - `404 Not Found`: no user has this ID.
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    user_id: web::Path<i32>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    let user = state.users.get(&current, user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Updates the first and/or last name of a user.
///
/// Any authenticated caller may update any user.
///
/// ## Responses:
/// - `200 OK`: the updated user.
/// - `404 Not Found`: no user has this ID.
/// - `422 Unprocessable Entity`: empty or overlong names, or fields other than the names.
#[patch("/{id}")]
pub async fn update_user(
    state: web::Data<AppState>,
    user_id: web::Path<i32>,
    changes: web::Json<UpdateUserRequest>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    changes.validate()?;
    let user = state
        .users
        .update(&current, user_id.into_inner(), changes.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Deletes a user together with the tasks they own.
///
/// Any authenticated caller may delete any user. Tokens already issued to the deleted
/// user stop working on their next request.
///
/// ## Responses:
/// - `204 No Content`: on successful deletion.
/// - `404 Not Found`: no user has this ID.
#[delete("/{id}")]
pub async fn delete_user(
    state: web::Data<AppState>,
    user_id: web::Path<i32>,
    current: CurrentUser,
) -> Result<impl Responder, AppError> {
    state.users.delete(&current, user_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
