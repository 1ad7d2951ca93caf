#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};
use tasktracker::config::{Config, StoreBackend};
use tasktracker::{routes, AppState};

pub const PASSWORD: &str = "Aa1!aaaa";

// Helper struct to hold auth details
pub struct TestUser {
    pub id: i32,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token))
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        store_backend: StoreBackend::Memory,
        server_port: 0,
        server_host: "127.0.0.1".to_string(),
        jwt_secret: "integration_test_secret".to_string(),
        jwt_expires_in_secs: 3600,
        // lowest bcrypt cost keeps the suite fast
        bcrypt_cost: 4,
    }
}

pub fn test_state() -> web::Data<AppState> {
    web::Data::new(AppState::in_memory(&test_config()))
}

/// The application as `main` builds it, minus CORS and access logging.
pub fn test_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .service(routes::health::health)
        .service(web::scope("/api").configure(routes::config))
}

pub async fn call_json<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            panic!(
                "non-JSON body ({}): {:?}",
                e,
                String::from_utf8_lossy(&bytes)
            )
        })
    };
    (status, body)
}

pub async fn register<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "firstName": "J",
            "lastName": "X",
            "email": email,
            "password": password
        }))
        .to_request();
    call_json(app, req).await
}

pub async fn login<S, B>(app: &S, email: &str, password: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    call_json(app, req).await
}

pub async fn register_and_login<S, B>(app: &S, email: &str) -> TestUser
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = register(app, email, PASSWORD).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    let (status, body) = login(app, email, PASSWORD).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);

    TestUser {
        id: body["user"]["id"].as_i64().expect("user id") as i32,
        token: body["token"].as_str().expect("token").to_string(),
    }
}
