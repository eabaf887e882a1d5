//! Todo list API handlers
//!
//! Contains HTTP request handlers for list and item operations. Handlers
//! only validate input and translate path parameters; all storage work
//! goes through the data-access layer.

use crate::dal::{ListId, ListSummary, ToDoList};
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};

/// Create list request
#[derive(Debug, Deserialize)]
pub struct NewList {
    /// Name for the new list
    pub name: String,
}

/// Create list response
#[derive(Debug, Serialize, Deserialize)]
pub struct NewListResponse {
    /// Identifier assigned by the store
    pub id: ListId,
    /// Name of the new list
    pub name: String,
}

/// Create item request
#[derive(Debug, Deserialize)]
pub struct NewItem {
    /// Label for the new item
    pub label: String,
}

/// Update checked state request
#[derive(Debug, Deserialize)]
pub struct CheckedStateUpdate {
    /// Item to update
    pub item_id: String,
    /// New completion flag
    pub checked_state: bool,
}

/// Reject empty or whitespace-only text fields
pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// GET /api/lists - List summaries of all lists
pub async fn get_all_lists(
    State(state): State<AppState>,
) -> Result<Json<Vec<ListSummary>>, AppError> {
    let summaries: Vec<ListSummary> = state.dal.list_todo_lists().await?.try_collect().await?;
    Ok(Json(summaries))
}

/// POST /api/lists - Create a new list
pub async fn create_todo_list(
    State(state): State<AppState>,
    Json(request): Json<NewList>,
) -> Result<(StatusCode, Json<NewListResponse>), AppError> {
    require_text("name", &request.name)?;

    let id = state.dal.create_todo_list(&request.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(NewListResponse {
            id,
            name: request.name,
        }),
    ))
}

/// GET /api/lists/:list_id - Get a list with its items
pub async fn get_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<ToDoList>, AppError> {
    let id: ListId = list_id.parse()?;
    Ok(Json(state.dal.get_todo_list(&id).await?))
}

/// DELETE /api/lists/:list_id - Delete a list and its items
pub async fn delete_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<bool>, AppError> {
    let id: ListId = list_id.parse()?;
    Ok(Json(state.dal.delete_todo_list(&id).await?))
}

/// POST /api/lists/:list_id/items - Append an item to a list
pub async fn create_item(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Json(request): Json<NewItem>,
) -> Result<(StatusCode, Json<ToDoList>), AppError> {
    let id: ListId = list_id.parse()?;
    require_text("label", &request.label)?;

    let list = state.dal.create_item(&id, &request.label).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

/// DELETE /api/lists/:list_id/items/:item_id - Remove an item from a list
pub async fn delete_item(
    State(state): State<AppState>,
    Path((list_id, item_id)): Path<(String, String)>,
) -> Result<Json<ToDoList>, AppError> {
    let id: ListId = list_id.parse()?;
    Ok(Json(state.dal.delete_item(&id, &item_id).await?))
}

/// PATCH /api/lists/:list_id/checked_state - Set an item's completion flag
pub async fn set_checked_state(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Json(request): Json<CheckedStateUpdate>,
) -> Result<Json<ToDoList>, AppError> {
    let id: ListId = list_id.parse()?;
    let list = state
        .dal
        .set_checked_state(&id, &request.item_id, request.checked_state)
        .await?;
    Ok(Json(list))
}
