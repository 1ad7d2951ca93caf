use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;

use crate::error::AppError;
use crate::models::User;

/// The identity resolved by `AuthGuard` for the current request.
///
/// Handlers take it as an argument and pass it on to service calls explicitly; it is
/// never mutated after the guard attaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub User);

impl Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &User {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>().cloned() {
            Some(user) => ready(Ok(user)),
            // The route is not behind AuthGuard.
            None => ready(Err(AppError::Unauthenticated.into())),
        }
    }
}
