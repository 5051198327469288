mod common;

use actix_web::{http::StatusCode, test};
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::json;
use tasktrack::auth::TokenService;
use tasktrack::models::{TokenResponse, UserSummary};

#[test_log::test(actix_web::test)]
async fn test_signup_and_login_flow() {
    let app = common::init_app().await;

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "name": "Ann", "identity": "ann@x.com", "password": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: UserSummary = test::read_body_json(resp).await;
    assert_eq!(
        summary,
        UserSummary {
            id: 1,
            identity: "ann@x.com".to_string()
        }
    );

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "identity": "ann@x.com", "password": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let token: TokenResponse = test::read_body_json(resp).await;
    assert_eq!(token.token_type, "bearer");

    let config = common::test_config();
    let tokens = TokenService::new(&config.jwt_secret, Duration::hours(config.token_ttl_hours));
    assert_eq!(tokens.verify(&token.access_token).unwrap().sub, "ann@x.com");
}

#[test_log::test(actix_web::test)]
async fn test_signup_response_never_contains_password() {
    let app = common::init_app().await;

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({ "name": "Ann", "identity": "ann@x.com", "password": "p1" }))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({ "id": 1, "identity": "ann@x.com" }));
}

#[test_log::test(actix_web::test)]
async fn test_duplicate_signup_is_400() {
    let app = common::init_app().await;

    let payloads = [
        json!({ "name": "Ann", "identity": "ann@x.com", "password": "p1" }),
        json!({ "name": "Ann", "identity": "ann@x.com", "password": "p1" }),
        json!({ "name": "Impostor", "identity": "ann@x.com", "password": "other" }),
    ];

    let mut statuses = Vec::new();
    for payload in payloads {
        let req = test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: serde_json::Value = test::read_body_json(resp).await;
        if status == StatusCode::BAD_REQUEST {
            assert_eq!(body["code"], "duplicate_identity");
        }
        statuses.push(status);
    }

    assert_eq!(
        statuses,
        vec![StatusCode::OK, StatusCode::BAD_REQUEST, StatusCode::BAD_REQUEST]
    );
}

#[test_log::test(actix_web::test)]
async fn test_failed_logins_are_indistinguishable() {
    let app = common::init_app().await;
    common::signup_and_login(&app, "Ann", "ann@x.com", "p1").await;

    let mut bodies = Vec::new();
    for payload in [
        json!({ "identity": "ann@x.com", "password": "wrong" }),
        json!({ "identity": "nobody@x.com", "password": "p1" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["code"], "invalid_credentials");
}

#[test_log::test(actix_web::test)]
async fn test_identity_is_case_sensitive() {
    let app = common::init_app().await;
    common::signup_and_login(&app, "Ann", "ann@x.com", "p1").await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "identity": "ANN@x.com", "password": "p1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[test_log::test(actix_web::test)]
async fn test_invalid_auth_inputs() {
    let app = common::init_app().await;

    let test_cases = vec![
        (
            "/auth/signup",
            json!({ "identity": "ann@x.com", "password": "p1" }),
            "missing name",
        ),
        (
            "/auth/signup",
            json!({ "name": "Ann", "password": "p1" }),
            "missing identity",
        ),
        (
            "/auth/signup",
            json!({ "name": "Ann", "identity": "", "password": "p1" }),
            "empty identity",
        ),
        (
            "/auth/signup",
            json!({ "name": "Ann", "identity": "ann@x.com", "password": "" }),
            "empty password",
        ),
        (
            "/auth/login",
            json!({ "identity": "ann@x.com" }),
            "login without password",
        ),
    ];

    for (uri, payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: serde_json::Value = test::read_body_json(resp).await;

        assert_eq!(
            status,
            StatusCode::UNPROCESSABLE_ENTITY,
            "Test case failed: {}. Body: {}",
            description,
            body
        );
        assert_eq!(body["code"], "validation_error", "{}", description);
    }
}

#[test_log::test(actix_web::test)]
async fn test_health_and_index_are_public() {
    let app = common::init_app().await;

    for uri in ["/health", "/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
    }
}
