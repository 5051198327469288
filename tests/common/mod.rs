#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{http::header, test, App};
use serde_json::json;
use tasktrack::{db, routes, AppState, Config};

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some("integration_test_secret".to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

pub async fn test_state() -> AppState {
    let config = test_config();
    let pool = db::connect(&config.database_url)
        .await
        .expect("Failed to open in-memory database");
    AppState::new(pool, &config)
}

/// The full application over a fresh in-memory database.
pub async fn init_app(
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let state = test_state().await;
    test::init_service(
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .configure(|cfg| state.configure(cfg))
            .configure(routes::config),
    )
    .await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Signs a user up, logs them in and returns the access token.
pub async fn signup_and_login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    name: &str,
    identity: &str,
    password: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "name": name, "identity": identity, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "signup of {} failed: {}", identity, resp.status());

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "identity": identity, "password": password }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(app, req).await;
    body["access_token"]
        .as_str()
        .expect("login returns an access token")
        .to_string()
}
