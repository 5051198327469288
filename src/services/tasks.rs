//! Ownership-scoped task CRUD.
//!
//! Every operation starts by resolving the authenticated identity to a stored user
//! and fails with `UserNotFound` if it no longer exists. From then on the user's id
//! is the only owner ever read from or written to storage; nothing the client sends
//! can choose a different one.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use validator::Validate;

use crate::error::AppError;
use crate::models::{Task, TaskCreate, TaskUpdate, User};
use crate::store::{tasks, users};

#[derive(Clone)]
pub struct TaskService {
    pool: SqlitePool,
}

async fn resolve_owner(conn: &mut SqliteConnection, identity: &str) -> Result<User, AppError> {
    users::find_by_identity(conn, identity)
        .await?
        .ok_or(AppError::UserNotFound)
}

impl TaskService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Creates a task owned by `identity`. A missing due date becomes "now".
    pub async fn create(&self, identity: &str, input: TaskCreate) -> Result<Task, AppError> {
        input.validate()?;

        let mut tx = self.pool.begin().await?;
        let owner = resolve_owner(&mut tx, identity).await?;
        let task = tasks::insert(
            &mut tx,
            tasks::NewTask {
                title: &input.title,
                description: input.description.as_deref(),
                status: input.status,
                due_date: input.due_date.unwrap_or_else(Utc::now),
                user_id: owner.id,
            },
        )
        .await?;
        tx.commit().await?;

        log::info!("User {} created task {}", owner.id, task.id);
        Ok(task)
    }

    /// All tasks owned by `identity`, in creation order.
    pub async fn list(&self, identity: &str) -> Result<Vec<Task>, AppError> {
        let mut conn = self.pool.acquire().await?;
        let owner = resolve_owner(&mut conn, identity).await?;
        tasks::list_for_owner(&mut conn, owner.id).await
    }

    /// One task owned by `identity`.
    pub async fn get(&self, identity: &str, task_id: i64) -> Result<Task, AppError> {
        let mut conn = self.pool.acquire().await?;
        let owner = resolve_owner(&mut conn, identity).await?;
        tasks::find_owned(&mut conn, task_id, owner.id)
            .await?
            .ok_or(AppError::TaskNotFound)
    }

    /// Applies the fields present in `update` to a task owned by `identity`.
    pub async fn update(
        &self,
        identity: &str,
        task_id: i64,
        update: TaskUpdate,
    ) -> Result<Task, AppError> {
        update.validate()?;

        let mut tx = self.pool.begin().await?;
        let owner = resolve_owner(&mut tx, identity).await?;
        let mut task = tasks::find_owned(&mut tx, task_id, owner.id)
            .await?
            .ok_or(AppError::TaskNotFound)?;

        task.apply(update);

        let saved = tasks::save_owned(&mut tx, &task)
            .await?
            .ok_or(AppError::TaskNotFound)?;
        tx.commit().await?;

        log::info!("User {} updated task {}", owner.id, saved.id);
        Ok(saved)
    }

    /// Deletes a task owned by `identity`. Deleting it a second time is `TaskNotFound`.
    pub async fn delete(&self, identity: &str, task_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let owner = resolve_owner(&mut tx, identity).await?;
        if !tasks::delete_owned(&mut tx, task_id, owner.id).await? {
            return Err(AppError::TaskNotFound);
        }
        tx.commit().await?;

        log::info!("User {} deleted task {}", owner.id, task_id);
        Ok(())
    }
}
