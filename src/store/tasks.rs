//! Task store: task rows keyed by owner.
//!
//! Every lookup by id also filters on `user_id`, so a row owned by someone else is
//! indistinguishable from a missing one.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::{Task, TaskStatus};

/// Column list shared by every query returning a `Task`.
const TASK_COLUMNS: &str = "id, title, description, status, due_date, user_id";

/// Fields of a task row that are not assigned by the database.
pub struct NewTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: TaskStatus,
    pub due_date: DateTime<Utc>,
    pub user_id: i64,
}

pub async fn insert(conn: &mut SqliteConnection, task: NewTask<'_>) -> Result<Task, AppError> {
    let sql = format!(
        "INSERT INTO tasks (title, description, status, due_date, user_id) \
         VALUES (?, ?, ?, ?, ?) RETURNING {}",
        TASK_COLUMNS
    );
    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(task.due_date)
        .bind(task.user_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(task)
}

/// All tasks of `user_id`, in insertion order.
pub async fn list_for_owner(conn: &mut SqliteConnection, user_id: i64) -> Result<Vec<Task>, AppError> {
    let sql = format!("SELECT {} FROM tasks WHERE user_id = ? ORDER BY id", TASK_COLUMNS);
    let tasks = sqlx::query_as::<_, Task>(&sql)
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

    Ok(tasks)
}

pub async fn find_owned(
    conn: &mut SqliteConnection,
    task_id: i64,
    user_id: i64,
) -> Result<Option<Task>, AppError> {
    let sql = format!("SELECT {} FROM tasks WHERE id = ? AND user_id = ?", TASK_COLUMNS);
    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(task)
}

/// Writes every mutable column of `task` back, scoped to its owner.
///
/// Returns `None` if the row vanished or changed hands in the meantime.
pub async fn save_owned(conn: &mut SqliteConnection, task: &Task) -> Result<Option<Task>, AppError> {
    let sql = format!(
        "UPDATE tasks SET title = ?, description = ?, status = ?, due_date = ? \
         WHERE id = ? AND user_id = ? RETURNING {}",
        TASK_COLUMNS
    );
    let saved = sqlx::query_as::<_, Task>(&sql)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.due_date)
        .bind(task.id)
        .bind(task.user_id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(saved)
}

/// Deletes the task if `user_id` owns it. Returns whether a row was removed.
pub async fn delete_owned(conn: &mut SqliteConnection, task_id: i64, user_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
        .bind(task_id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
