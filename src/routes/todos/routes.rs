use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{CreateTodoRequest, UpdateTodoRequest};
use super::extract::JsonBody;
use super::validation::{
    validate_create, validate_due_date_param, validate_id, validate_literal_param,
    validate_points_param, validate_update,
};
use super::{queries, Category, Priority, Status};
use crate::error::ApiError;
use crate::routes::TODOS_PREFIX;
use crate::state::AppState;

// HANDLERS

/// List every todo
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let todos = queries::list_todos(&state.db).await?;

    Ok(Json(todos))
}

/// Get a single todo by id. A missing row answers 200 with an empty body.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = validate_id(&id)?;

    match queries::get_todo(&state.db, id).await? {
        Some(todo) => Ok(Json(todo).into_response()),
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// Create a todo. The body stays empty; the new id is in `Location`.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = validate_create(payload)?;

    let id = queries::create_todo(&state.db, todo).await?;
    tracing::info!(%id, "todo created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("{}/{}", TODOS_PREFIX, id))],
    ))
}

/// Delete a todo. Deleting an unknown id still succeeds.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validate_id(&id)?;

    queries::delete_todo(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Update any subset of a todo's fields
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateTodoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validate_id(&id)?;
    let changes = validate_update(payload)?;

    if changes.is_empty() {
        return Ok(StatusCode::NO_CONTENT);
    }

    let updated = queries::update_todo(&state.db, id, changes).await?;
    tracing::debug!(%id, updated, "todo update applied");

    Ok(StatusCode::NO_CONTENT)
}

// FILTERS

pub async fn by_priority(
    State(state): State<AppState>,
    Path(priority): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let priority = validate_literal_param::<Priority>("priority", &priority)?;

    Ok(Json(queries::list_by_priority(&state.db, priority).await?))
}

pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category = validate_literal_param::<Category>("category", &category)?;

    Ok(Json(queries::list_by_category(&state.db, category).await?))
}

pub async fn by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let status = validate_literal_param::<Status>("status", &status)?;

    Ok(Json(queries::list_by_status(&state.db, status).await?))
}

/// Exact match on evaluation points
pub async fn by_points(
    State(state): State<AppState>,
    Path(points): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let points = validate_points_param(&points)?;

    Ok(Json(queries::list_by_points(&state.db, points).await?))
}

/// Exact match on the due date instant
pub async fn by_due_date(
    State(state): State<AppState>,
    Path(due_date): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let due_date = validate_due_date_param(&due_date)?;

    Ok(Json(queries::list_by_due_date(&state.db, due_date).await?))
}
