//! Credential store: persisted user records.

use chrono::Utc;
use sqlx::SqliteConnection;

use crate::error::AppError;
use crate::models::User;

/// Inserts a new user. The hash must already be computed.
///
/// A clash on the UNIQUE identity column (two signups racing past the existence
/// check) is reported as `AppError::DuplicateIdentity`.
pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    identity: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, identity, password_hash, created_at)
        VALUES (?, ?, ?, ?)
        RETURNING id, name, identity, password_hash, created_at
        "#,
    )
    .bind(name)
    .bind(identity)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::DuplicateIdentity
        }
        other => AppError::from(other),
    })
}

/// Looks a user up by exact, case-sensitive identity.
pub async fn find_by_identity(
    conn: &mut SqliteConnection,
    identity: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, identity, password_hash, created_at
        FROM users
        WHERE identity = ?
        "#,
    )
    .bind(identity)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(user)
}
