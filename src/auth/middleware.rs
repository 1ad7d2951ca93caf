use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::credentials::CredentialService;
use crate::auth::extractors::CurrentUser;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;
use crate::store::UserStore;

/// Returns the token of an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Anything else, including an empty token,
/// yields `None`.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() || token.contains(' ') {
        return None;
    }
    Some(token)
}

/// Resolves the caller behind an `Authorization` header.
///
/// Missing or malformed headers, tokens that fail verification and tokens whose user has
/// since been deleted all fail with the same `AppError::Unauthenticated`. The user lookup
/// is the only place a deleted user loses access, because tokens are never revoked.
pub async fn authenticate(
    authorization: Option<&str>,
    credentials: &CredentialService,
    users: &dyn UserStore,
) -> Result<User, AppError> {
    let token = authorization
        .and_then(bearer_token)
        .ok_or(AppError::Unauthenticated)?;

    let payload = credentials
        .decode_and_verify(token)
        .map_err(|_| AppError::Unauthenticated)?;

    match users.find_by_id(payload.id).await? {
        Some(user) => Ok(user),
        None => {
            log::debug!("token for user {} outlived the account", payload.id);
            Err(AppError::Unauthenticated)
        }
    }
}

/// Middleware guarding every route of the scope it wraps.
///
/// On success the resolved [`CurrentUser`] is stored in the request extensions for the
/// handler to extract. It performs authentication only: any authenticated caller may act
/// on any user or task.
pub struct AuthGuard;

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthGuardService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthGuardService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let resolved = resolve_caller(&req).await;
            match resolved {
                Ok(user) => {
                    req.extensions_mut().insert(CurrentUser(user));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => Ok(req.error_response(err).map_into_right_body()),
            }
        })
    }
}

async fn resolve_caller(req: &ServiceRequest) -> Result<User, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("AppState is not registered".into()))?;

    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    authenticate(authorization, &state.credentials, state.user_store.as_ref()).await
}
