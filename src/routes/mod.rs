pub mod auth;
pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthGuard;
use crate::error::AppError;

/// JSON extractor settings: unreadable bodies become `422` with the parser message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

/// Registers the API routes. Mounted under `/api` by the server.
///
/// `/auth` is public; `/users` and `/tasks` sit behind [`AuthGuard`].
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/auth")
                .service(auth::login)
                .service(auth::register),
        )
        .service(
            web::scope("/users")
                .wrap(AuthGuard)
                .service(users::get_me)
                .service(users::get_users)
                .service(users::get_user)
                .service(users::update_user)
                .service(users::delete_user),
        )
        .service(
            web::scope("/tasks")
                .wrap(AuthGuard)
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task_status)
                .service(tasks::delete_task),
        );
}
