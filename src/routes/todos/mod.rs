pub mod dto;
pub mod extract;
pub mod queries;
pub mod routes;
pub mod validation;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// MODELS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "todo_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Home,
    Work,
    Personal,
    Shopping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "todo_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "todo_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub evaluation_points: i32,
    pub due_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// LITERALS

/// A closed set of lowercase literals accepted at the HTTP boundary.
pub trait Literal: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn expected() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
        format!("expected one of {}", names.join(", "))
    }
}

impl Literal for Category {
    const ALL: &'static [Self] = &[
        Category::Home,
        Category::Work,
        Category::Personal,
        Category::Shopping,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Category::Home => "home",
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Shopping => "shopping",
        }
    }
}

impl Literal for Priority {
    const ALL: &'static [Self] = &[
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Critical,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl Literal for Status {
    const ALL: &'static [Self] = &[Status::Todo, Status::Done];

    fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Done => "done",
        }
    }
}

/// Exact, case-sensitive match against the literal set.
pub fn parse_literal<T: Literal>(raw: &str) -> Option<T> {
    T::ALL.iter().copied().find(|v| v.as_str() == raw)
}

macro_rules! literal_traits {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_literal(s).ok_or_else(<$ty as Literal>::expected)
            }
        }
    )*};
}

literal_traits!(Category, Priority, Status);
