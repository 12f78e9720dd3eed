use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use super::{Category, Priority, Status};

// Enum and date fields arrive as plain strings so that every bad field can be
// reported in one response.

#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "integral_points")]
    pub evaluation_points: Option<i32>,
    pub due_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "integral_points")]
    pub evaluation_points: Option<i32>,
    pub due_date: Option<String>,
}

/// Whole numbers in the i32 range, whether written `3` or `3.0`.
pub fn points_from_f64(n: f64) -> Option<i32> {
    if n.is_finite() && n.fract() == 0.0 && n >= i32::MIN as f64 && n <= i32::MAX as f64 {
        Some(n as i32)
    } else {
        None
    }
}

fn integral_points<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(n) => points_from_f64(n)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected a whole number of evaluation points")),
    }
}

/// A validated create request. `None` leaves the column default in place.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub evaluation_points: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
}

/// A validated partial update. Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
    pub evaluation_points: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
