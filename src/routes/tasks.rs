//! Task endpoints. All of them sit behind `AuthMiddleware`, and every one passes the
//! authenticated identity to `TaskService`, which does the ownership scoping.

use crate::{
    auth::AuthenticatedIdentity,
    error::AppError,
    models::{TaskCreate, TaskUpdate},
    services::TaskService,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

/// Lists the authenticated user's tasks.
///
/// There is no filter parameter; the result is always exactly the caller's tasks.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: the token's subject no longer exists.
#[get("")]
pub async fn list_tasks(
    tasks: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list(&identity.0).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1 to 200 characters.
/// - `description` (optional): up to 1000 characters.
/// - `status` (optional): `"Pending"`, `"In Progress"` or `"Completed"`. Defaults to `"Pending"`.
/// - `due_date` (optional): RFC 3339 timestamp. Defaults to the creation time.
///
/// Any `id` or `user_id` in the body is ignored.
///
/// ## Responses:
/// - `200 OK`: the created `Task`, including its generated id.
/// - `401 Unauthorized`, `404 Not Found` (user), `422 Unprocessable Entity`.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    task_data: web::Json<TaskCreate>,
) -> Result<impl Responder, AppError> {
    let task = tasks.create(&identity.0, task_data.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Retrieves one of the authenticated user's tasks.
///
/// A task owned by someone else is reported as `404`, exactly like a missing one.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let task = tasks.get(&identity.0, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Partially updates one of the authenticated user's tasks.
///
/// Only the fields present in the body change. `description` and `due_date` may be
/// cleared with an explicit `null`; `title` and `status` may not.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `401 Unauthorized`, `404 Not Found` (user or task), `422 Unprocessable Entity`.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    task_id: web::Path<i64>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .update(&identity.0, task_id.into_inner(), task_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Deletes one of the authenticated user's tasks.
///
/// Not idempotent: deleting an already-deleted id is `404`.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskService>,
    identity: AuthenticatedIdentity,
    task_id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    tasks.delete(&identity.0, task_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Task deleted successfully" })))
}
