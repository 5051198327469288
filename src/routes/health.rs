use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::error::AppError;
use crate::services::TaskService;

/// Liveness probe. Touches the database so a dead pool reports as a 500.
#[get("/health")]
pub async fn health(tasks: web::Data<TaskService>) -> Result<HttpResponse, AppError> {
    tasks.ping().await?;
    Ok(HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    })))
}

#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "message": "Task Management API Is Running!" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_reports_ok_with_live_database() {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(TaskService::new(pool)))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn test_health_fails_once_pool_is_closed() {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        pool.close().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(TaskService::new(pool)))
                .service(health),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_index_greets() {
        let app = test::init_service(App::new().service(index)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!({ "message": "Task Management API Is Running!" }));
    }
}
