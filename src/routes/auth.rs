use crate::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    error::AppError,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates a user account and returns it without the password hash.
///
/// ## Responses:
/// - `201 Created`: the new user.
/// - `400 Bad Request`: the email is already in use.
/// - `422 Unprocessable Entity`: invalid email, weak password or missing names.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let created = state.auth.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(created.into_user()))
}

/// Login user
///
/// Authenticates a user and returns `{user, token}`.
///
/// ## Responses:
/// - `200 OK`: the user and a bearer token.
/// - `401 Unauthorized`: unknown email or wrong password, indistinguishably.
/// - `422 Unprocessable Entity`: malformed email or empty password.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let (user, token) = state
        .auth
        .login(&login_data.email, &login_data.password)
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse { user, token }))
}
