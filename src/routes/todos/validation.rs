use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::dto::{points_from_f64, CreateTodoRequest, NewTodo, TodoChanges, UpdateTodoRequest};
use super::{parse_literal, Literal};
use crate::error::{ApiError, ValidationErrors};

// FIELD RULES

// Title and description must carry some non-whitespace text
fn check_text(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    Ok(())
}

fn check_literal<T: Literal>(raw: &str) -> Result<T, String> {
    parse_literal(raw).ok_or_else(T::expected)
}

fn check_date_time(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| "expected an RFC 3339 date-time, e.g. 2024-06-12T12:00:00.000Z".to_string())
}

fn collect<T>(errors: &mut ValidationErrors, field: &str, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

fn optional_text(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    let value = value?;
    collect(errors, field, check_text(field, &value)).map(|_| value)
}

fn required_text(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    if value.is_none() {
        errors.push(field, format!("{} is required", field));
    }
    optional_text(errors, field, value)
}

fn optional_literal<T: Literal>(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<String>,
) -> Option<T> {
    collect(errors, field, check_literal(&raw?))
}

fn optional_date_time(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<String>,
) -> Option<DateTime<Utc>> {
    collect(errors, field, check_date_time(&raw?))
}

// REQUESTS

pub fn validate_create(req: CreateTodoRequest) -> Result<NewTodo, ApiError> {
    let mut errors = ValidationErrors::new();

    let title = required_text(&mut errors, "title", req.title);
    let description = required_text(&mut errors, "description", req.description);
    let category = optional_literal(&mut errors, "category", req.category);
    let priority = optional_literal(&mut errors, "priority", req.priority);
    let due_date = optional_date_time(&mut errors, "due_date", req.due_date);

    match (title, description) {
        (Some(title), Some(description)) if errors.is_empty() => Ok(NewTodo {
            title,
            description,
            category,
            priority,
            evaluation_points: req.evaluation_points,
            due_date,
        }),
        _ => Err(errors.into()),
    }
}

pub fn validate_update(req: UpdateTodoRequest) -> Result<TodoChanges, ApiError> {
    let mut errors = ValidationErrors::new();

    let changes = TodoChanges {
        title: optional_text(&mut errors, "title", req.title),
        description: optional_text(&mut errors, "description", req.description),
        category: optional_literal(&mut errors, "category", req.category),
        priority: optional_literal(&mut errors, "priority", req.priority),
        status: optional_literal(&mut errors, "status", req.status),
        evaluation_points: req.evaluation_points,
        due_date: optional_date_time(&mut errors, "due_date", req.due_date),
    };

    errors.into_result()?;
    Ok(changes)
}

// PATH PARAMETERS

/// Only the canonical hyphenated form is accepted.
pub fn validate_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw)
        .ok()
        .filter(|_| raw.len() == 36)
        .ok_or_else(|| ValidationErrors::single("id", "expected a UUID").into())
}

pub fn validate_literal_param<T: Literal>(field: &str, raw: &str) -> Result<T, ApiError> {
    check_literal(raw).map_err(|message| ValidationErrors::single(field, message).into())
}

pub fn validate_points_param(raw: &str) -> Result<i32, ApiError> {
    if raw.is_empty() {
        return Err(ValidationErrors::single("evaluation_points", "evaluation_points is required").into());
    }
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(points_from_f64)
        .ok_or_else(|| ValidationErrors::single("evaluation_points", "expected an integer").into())
}

pub fn validate_due_date_param(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    if raw.is_empty() {
        return Err(ValidationErrors::single("due_date", "due_date is required").into());
    }
    check_date_time(raw).map_err(|message| ValidationErrors::single("due_date", message).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::todos::{Category, Priority, Status};
    use chrono::TimeZone;

    fn issues(err: ApiError) -> Vec<String> {
        match err {
            ApiError::Validation(e) => e.issues.into_iter().map(|i| i.field).collect(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn create_request() -> CreateTodoRequest {
        CreateTodoRequest {
            title: Some("Buy milk".into()),
            description: Some("2%".into()),
            category: Some("shopping".into()),
            priority: Some("low".into()),
            evaluation_points: None,
            due_date: Some("2024-06-12T12:00:00.000Z".into()),
        }
    }

    #[test]
    fn test_create_accepts_full_body() {
        let todo = validate_create(create_request()).unwrap();

        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, "2%");
        assert_eq!(todo.category, Some(Category::Shopping));
        assert_eq!(todo.priority, Some(Priority::Low));
        assert_eq!(todo.evaluation_points, None);
        assert_eq!(
            todo.due_date,
            Some(Utc.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_create_leaves_defaults_to_store() {
        let req = CreateTodoRequest {
            title: Some("Read".into()),
            description: Some("a book".into()),
            ..Default::default()
        };
        let todo = validate_create(req).unwrap();

        assert_eq!(todo.category, None);
        assert_eq!(todo.priority, None);
        assert_eq!(todo.due_date, None);
    }

    #[test]
    fn test_create_reports_every_bad_field() {
        let req = CreateTodoRequest {
            title: Some("   ".into()),
            description: None,
            category: Some("garden".into()),
            priority: Some("urgent".into()),
            evaluation_points: Some(3),
            due_date: Some("tomorrow".into()),
        };

        assert_eq!(
            issues(validate_create(req).unwrap_err()),
            vec!["title", "description", "category", "priority", "due_date"]
        );
    }

    #[test]
    fn test_update_only_supplied_fields() {
        let req = UpdateTodoRequest {
            status: Some("done".into()),
            ..Default::default()
        };
        let changes = validate_update(req).unwrap();

        assert_eq!(
            changes,
            TodoChanges {
                status: Some(Status::Done),
                ..Default::default()
            }
        );
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_update_empty_body_is_empty_change() {
        assert!(validate_update(UpdateTodoRequest::default()).unwrap().is_empty());
    }

    #[test]
    fn test_update_rejects_bad_literals() {
        let req = UpdateTodoRequest {
            status: Some("completed".into()),
            description: Some("".into()),
            ..Default::default()
        };

        assert_eq!(issues(validate_update(req).unwrap_err()), vec!["description", "status"]);
    }

    #[test]
    fn test_validate_id() {
        let id = Uuid::new_v4();
        assert_eq!(validate_id(&id.to_string()).unwrap(), id);

        assert_eq!(issues(validate_id("abc").unwrap_err()), vec!["id"]);
        assert!(validate_id(&id.simple().to_string()).is_err());
        assert!(validate_id("").is_err());
    }

    #[test]
    fn test_literal_params() {
        assert_eq!(
            validate_literal_param::<Priority>("priority", "high").unwrap(),
            Priority::High
        );
        assert_eq!(
            issues(validate_literal_param::<Priority>("priority", "extreme").unwrap_err()),
            vec!["priority"]
        );
        assert!(validate_literal_param::<Category>("category", "HOME").is_err());
    }

    #[test]
    fn test_points_param() {
        assert_eq!(validate_points_param("5").unwrap(), 5);
        assert_eq!(validate_points_param("-2").unwrap(), -2);
        assert_eq!(validate_points_param("5.0").unwrap(), 5);
        assert!(validate_points_param("5.5").is_err());
        assert!(validate_points_param("NaN").is_err());
        assert!(validate_points_param("five").is_err());
        assert!(validate_points_param("").is_err());
    }

    #[test]
    fn test_due_date_param() {
        let expected = Utc.with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap();

        assert_eq!(validate_due_date_param("2024-06-12T12:00:00.000Z").unwrap(), expected);
        assert_eq!(validate_due_date_param("2024-06-12T14:00:00+02:00").unwrap(), expected);
        assert!(validate_due_date_param("2024-06-12").is_err());
    }
}
