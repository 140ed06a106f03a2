use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::study::{NewStudyTopic, StudyTopic, DEFAULT_RESOURCE_TYPE, DEFAULT_TOPIC_ICON};
use crate::models::Ack;
use crate::state::AppState;
use crate::study::store;

/// GET /api/study
pub async fn handle_list_topics(State(state): State<AppState>) -> Result<Json<Vec<StudyTopic>>, AppError> {
    Ok(Json(store::list_topics(&state.db).await?))
}

/// POST /api/study
///
/// The topic and its resources are written together or not at all.
pub async fn handle_create_topic(
    State(state): State<AppState>,
    Json(req): Json<NewStudyTopic>,
) -> Result<(StatusCode, Json<Ack>), AppError> {
    let title = req
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("Title is required".to_string()))?;

    if req
        .resources
        .iter()
        .any(|r| r.title.as_deref().map_or(true, |t| t.trim().is_empty()))
    {
        return Err(AppError::Validation("Every resource needs a title".to_string()));
    }

    let mut tx = state.db.begin().await?;
    let id = store::insert_topic(
        &mut tx,
        title,
        req.summary.as_deref().unwrap_or(""),
        req.subhead.as_deref().unwrap_or(""),
        req.icon.as_deref().unwrap_or(DEFAULT_TOPIC_ICON),
    )
    .await?;

    for resource in &req.resources {
        store::insert_resource(
            &mut tx,
            id,
            resource.kind.as_deref().unwrap_or(DEFAULT_RESOURCE_TYPE),
            resource.title.as_deref().unwrap_or_default().trim(),
            resource.detail.as_deref().unwrap_or(""),
            resource.url.as_deref().unwrap_or(""),
        )
        .await?;
    }
    tx.commit().await?;

    info!("Created study topic {id} ({title}) with {} resources", req.resources.len());
    Ok((StatusCode::CREATED, Json(Ack::created(id, "Study topic"))))
}

/// DELETE /api/study/:id
pub async fn handle_delete_topic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, AppError> {
    if !store::delete_topic(&state.db, id).await? {
        return Err(AppError::NotFound("Study topic not found".to_string()));
    }
    Ok(Json(Ack::done("Study topic deleted successfully")))
}
