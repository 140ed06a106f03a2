use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::role::{NewRole, RoleRow, RoleUpdate, DEFAULT_COLOR, DEFAULT_ICON};
use crate::models::Ack;
use crate::roles::store;
use crate::state::AppState;

/// GET /api/roles
pub async fn handle_list_roles(State(state): State<AppState>) -> Result<Json<Vec<RoleRow>>, AppError> {
    Ok(Json(store::list_roles(&state.db).await?))
}

/// GET /api/roles/:id
pub async fn handle_get_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RoleRow>, AppError> {
    store::get_role(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Role not found".to_string()))
}

/// POST /api/roles
pub async fn handle_create_role(
    State(state): State<AppState>,
    Json(req): Json<NewRole>,
) -> Result<(StatusCode, Json<Ack>), AppError> {
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("Name is required".to_string()))?;

    if store::get_role_by_name(&state.db, name).await?.is_some() {
        return Err(AppError::Conflict(format!("Role '{name}' already exists")));
    }

    let mut conn = state.db.acquire().await?;
    let id = store::insert_role(
        &mut conn,
        name,
        req.description.as_deref().unwrap_or(""),
        req.icon.as_deref().unwrap_or(DEFAULT_ICON),
        req.color.as_deref().unwrap_or(DEFAULT_COLOR),
    )
    .await
    .map_err(|e| AppError::from_write(e, format!("Role '{name}' already exists")))?;

    info!("Created role {id} ({name})");
    Ok((StatusCode::CREATED, Json(Ack::created(id, "Role"))))
}

/// PUT /api/roles/:id
pub async fn handle_update_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RoleUpdate>,
) -> Result<Json<Ack>, AppError> {
    if req.is_empty() {
        return Err(AppError::Validation("No changes provided".to_string()));
    }
    let updated = store::update_role(&state.db, id, &req)
        .await
        .map_err(|e| AppError::from_write(e, "Another role already uses that name"))?;
    if !updated {
        return Err(AppError::NotFound("Role not found".to_string()));
    }
    Ok(Json(Ack::done("Role updated successfully")))
}

/// DELETE /api/roles/:id
pub async fn handle_delete_role(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, AppError> {
    if !store::delete_role(&state.db, id).await? {
        return Err(AppError::NotFound("Role not found".to_string()));
    }
    info!("Deleted role {id} and its dependent data");
    Ok(Json(Ack::done("Role deleted successfully")))
}
