use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

const TITLE_MAX: usize = 200;
const DESCRIPTION_MAX: usize = 1000;

/// Represents the status of a task.
///
/// Stored and serialised as its display string. Any other string is rejected at
/// deserialisation, so the API never accepts a status outside this set.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, sqlx::Type)]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    Pending,
    /// Task is currently being worked on.
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    /// Task is completed.
    Completed,
}

/// Payload for creating a task.
///
/// Unknown fields (including any client-supplied `id` or `user_id`) are ignored;
/// ownership always comes from the authenticated identity.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskCreate {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Defaults to `Pending` when omitted.
    #[serde(default)]
    pub status: TaskStatus,

    /// Defaults to the creation time when omitted.
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update for a task.
///
/// Each field is `Option<Option<T>>`: the outer `Option` records whether the field
/// was present in the request at all, the inner one whether it was an explicit
/// `null`. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Option<TaskStatus>>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Marks a field as present even when its value is `null`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

impl Validate for TaskUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.title {
            Some(None) => errors.add("title", invalid("null", "title cannot be null")),
            Some(Some(title)) if title.is_empty() || title.chars().count() > TITLE_MAX => {
                errors.add("title", invalid("length", "title must be 1 to 200 characters"))
            }
            _ => {}
        }

        if let Some(Some(description)) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX {
                errors.add(
                    "description",
                    invalid("length", "description must be at most 1000 characters"),
                );
            }
        }

        if let Some(None) = self.status {
            errors.add("status", invalid("null", "status cannot be null"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: Option<DateTime<Utc>>,
    /// Identifier of the user who owns the task.
    pub user_id: i64,
}

impl Task {
    /// Applies only the fields present in `update`. Expects a validated update.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(Some(title)) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(Some(status)) = update.status {
            self.status = status;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_task() -> Task {
        Task {
            id: 1,
            title: "Buy milk".to_string(),
            description: Some("Semi-skimmed".to_string()),
            status: TaskStatus::Pending,
            due_date: Some(Utc::now()),
            user_id: 1,
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(TaskStatus::InProgress).unwrap(), json!("In Progress"));
        assert_eq!(serde_json::to_value(TaskStatus::Pending).unwrap(), json!("Pending"));
        assert!(serde_json::from_value::<TaskStatus>(json!("Done")).is_err());
        assert!(serde_json::from_value::<TaskStatus>(json!("in progress")).is_err());
    }

    #[test]
    fn test_create_defaults() {
        let input: TaskCreate = serde_json::from_value(json!({ "title": "X" })).unwrap();
        assert_eq!(input.status, TaskStatus::Pending);
        assert!(input.description.is_none());
        assert!(input.due_date.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_validation() {
        let input: TaskCreate = serde_json::from_value(json!({ "title": "" })).unwrap();
        assert!(input.validate().is_err());

        let input: TaskCreate =
            serde_json::from_value(json!({ "title": "a".repeat(201) })).unwrap();
        assert!(input.validate().is_err());

        let input: TaskCreate = serde_json::from_value(
            json!({ "title": "ok", "description": "b".repeat(1001) }),
        )
        .unwrap();
        assert!(input.validate().is_err());

        assert!(serde_json::from_value::<TaskCreate>(json!({ "title": "ok", "status": "Blocked" })).is_err());
    }

    #[test]
    fn test_update_distinguishes_absent_and_null() {
        let update: TaskUpdate =
            serde_json::from_value(json!({ "description": null, "status": "Completed" })).unwrap();

        assert_eq!(update.title, None);
        assert_eq!(update.description, Some(None));
        assert_eq!(update.status, Some(Some(TaskStatus::Completed)));
        assert_eq!(update.due_date, None);
    }

    #[test]
    fn test_update_rejects_null_required_fields() {
        let update: TaskUpdate = serde_json::from_value(json!({ "title": null })).unwrap();
        assert!(update.validate().is_err());

        let update: TaskUpdate = serde_json::from_value(json!({ "status": null })).unwrap();
        assert!(update.validate().is_err());

        let update: TaskUpdate = serde_json::from_value(json!({ "title": "" })).unwrap();
        assert!(update.validate().is_err());

        let update: TaskUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_apply_changes_only_present_fields() {
        let original = sample_task();
        let mut task = original.clone();

        task.apply(serde_json::from_value(json!({ "status": "Completed" })).unwrap());

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.title, original.title);
        assert_eq!(task.description, original.description);
        assert_eq!(task.due_date, original.due_date);
    }

    #[test]
    fn test_apply_clears_nullable_fields() {
        let mut task = sample_task();

        task.apply(serde_json::from_value(json!({ "description": null, "due_date": null })).unwrap());

        assert_eq!(task.description, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.title, "Buy milk");
    }
}
