use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Result};
use uuid::Uuid;

use super::dto::{NewTodo, TodoChanges};
use super::{Category, Priority, Status, Todo};

const COLUMNS: &str =
    "id, title, description, category, priority, status, evaluation_points, due_date, created_at";

pub async fn list_todos(pool: &PgPool) -> Result<Vec<Todo>> {
    let sql = format!("SELECT {} FROM todo ORDER BY created_at", COLUMNS);

    sqlx::query_as::<_, Todo>(&sql).fetch_all(pool).await
}

pub async fn get_todo(pool: &PgPool, id: Uuid) -> Result<Option<Todo>> {
    let sql = format!("SELECT {} FROM todo WHERE id = $1", COLUMNS);

    sqlx::query_as::<_, Todo>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Inserts a row with a fresh id. Fields left as `None` fall back to the
/// column defaults.
pub async fn create_todo(pool: &PgPool, todo: NewTodo) -> Result<Uuid> {
    let id = Uuid::new_v4();

    let mut columns = vec!["id", "title", "description"];
    if todo.category.is_some() {
        columns.push("category");
    }
    if todo.priority.is_some() {
        columns.push("priority");
    }
    if todo.evaluation_points.is_some() {
        columns.push("evaluation_points");
    }
    if todo.due_date.is_some() {
        columns.push("due_date");
    }

    let placeholders: Vec<String> = (1..=columns.len()).map(|n| format!("${}", n)).collect();
    let sql = format!(
        "INSERT INTO todo ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );

    let mut query = sqlx::query(&sql)
        .bind(id)
        .bind(todo.title)
        .bind(todo.description);

    if let Some(category) = todo.category {
        query = query.bind(category);
    }
    if let Some(priority) = todo.priority {
        query = query.bind(priority);
    }
    if let Some(points) = todo.evaluation_points {
        query = query.bind(points);
    }
    if let Some(due_date) = todo.due_date {
        query = query.bind(due_date);
    }

    query.execute(pool).await?;

    Ok(id)
}

/// Writes only the supplied fields. Returns the number of rows touched.
pub async fn update_todo(pool: &PgPool, id: Uuid, changes: TodoChanges) -> Result<u64> {
    let mut sets: Vec<String> = Vec::new();
    let mut bind_count = 1;

    for (column, present) in [
        ("title", changes.title.is_some()),
        ("description", changes.description.is_some()),
        ("category", changes.category.is_some()),
        ("priority", changes.priority.is_some()),
        ("status", changes.status.is_some()),
        ("evaluation_points", changes.evaluation_points.is_some()),
        ("due_date", changes.due_date.is_some()),
    ] {
        if present {
            sets.push(format!("{} = ${}", column, bind_count));
            bind_count += 1;
        }
    }

    if sets.is_empty() {
        return Ok(0);
    }

    let sql = format!("UPDATE todo SET {} WHERE id = ${}", sets.join(", "), bind_count);

    let mut query = sqlx::query(&sql);

    if let Some(title) = changes.title {
        query = query.bind(title);
    }
    if let Some(description) = changes.description {
        query = query.bind(description);
    }
    if let Some(category) = changes.category {
        query = query.bind(category);
    }
    if let Some(priority) = changes.priority {
        query = query.bind(priority);
    }
    if let Some(status) = changes.status {
        query = query.bind(status);
    }
    if let Some(points) = changes.evaluation_points {
        query = query.bind(points);
    }
    if let Some(due_date) = changes.due_date {
        query = query.bind(due_date);
    }

    let result = query.bind(id).execute(pool).await?;

    Ok(result.rows_affected())
}

pub async fn delete_todo(pool: &PgPool, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM todo WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}

// FILTERS

async fn list_where<T>(pool: &PgPool, column: &'static str, value: T) -> Result<Vec<Todo>>
where
    T: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send,
{
    let sql = format!(
        "SELECT {} FROM todo WHERE {} = $1 ORDER BY created_at",
        COLUMNS, column
    );

    sqlx::query_as::<_, Todo>(&sql)
        .bind(value)
        .fetch_all(pool)
        .await
}

pub async fn list_by_priority(pool: &PgPool, priority: Priority) -> Result<Vec<Todo>> {
    list_where(pool, "priority", priority).await
}

pub async fn list_by_category(pool: &PgPool, category: Category) -> Result<Vec<Todo>> {
    list_where(pool, "category", category).await
}

pub async fn list_by_status(pool: &PgPool, status: Status) -> Result<Vec<Todo>> {
    list_where(pool, "status", status).await
}

pub async fn list_by_points(pool: &PgPool, points: i32) -> Result<Vec<Todo>> {
    list_where(pool, "evaluation_points", points).await
}

pub async fn list_by_due_date(pool: &PgPool, due_date: DateTime<Utc>) -> Result<Vec<Todo>> {
    list_where(pool, "due_date", due_date).await
}
