use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::insights::store;
use crate::models::insight::{
    CategoryQuery, InsightCard, InsightCategory, InsightGroups, InsightUpdate, NewInsight,
};
use crate::models::Ack;
use crate::state::AppState;

fn parse_category(raw: &str) -> Result<InsightCategory, AppError> {
    raw.parse::<InsightCategory>().map_err(AppError::Validation)
}

/// GET /api/insights[?category=<readiness|velocity|market>]
///
/// Without a category the response is grouped by category; with one it is the
/// flat list for that category.
pub async fn handle_insights(
    State(state): State<AppState>,
    Query(params): Query<CategoryQuery>,
) -> Result<Response, AppError> {
    match params.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(raw) => {
            let category = parse_category(raw)?;
            let rows = store::list_insights(&state.db, Some(category)).await?;
            let cards: Vec<InsightCard> = rows.into_iter().map(InsightCard::from).collect();
            Ok(Json(cards).into_response())
        }
        None => {
            let rows = store::list_insights(&state.db, None).await?;
            Ok(Json(InsightGroups::from_rows(rows)).into_response())
        }
    }
}

/// POST /api/insights
pub async fn handle_create_insight(
    State(state): State<AppState>,
    Json(req): Json<NewInsight>,
) -> Result<(StatusCode, Json<Ack>), AppError> {
    let (raw_category, label) = match (req.category.as_deref(), req.label.as_deref().map(str::trim)) {
        (Some(c), Some(l)) if !l.is_empty() => (c, l),
        _ => {
            return Err(AppError::Validation(
                "category and label are required".to_string(),
            ))
        }
    };
    let category = parse_category(raw_category)?;

    let mut conn = state.db.acquire().await?;
    let id = store::insert_insight(
        &mut conn,
        category.as_str(),
        label,
        req.value.as_deref().unwrap_or(""),
        req.meta.as_deref().unwrap_or(""),
    )
    .await?;

    info!("Created {category} insight {id}");
    Ok((StatusCode::CREATED, Json(Ack::created(id, "Insight"))))
}

/// PUT /api/insights/:id
pub async fn handle_update_insight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut req): Json<InsightUpdate>,
) -> Result<Json<Ack>, AppError> {
    if req.is_empty() {
        return Err(AppError::Validation("No changes provided".to_string()));
    }
    if let Some(raw) = req.category.take() {
        req.category = Some(parse_category(&raw)?.as_str().to_string());
    }
    if !store::update_insight(&state.db, id, &req).await? {
        return Err(AppError::NotFound("Insight not found".to_string()));
    }
    Ok(Json(Ack::done("Insight updated successfully")))
}

/// DELETE /api/insights/:id
pub async fn handle_delete_insight(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, AppError> {
    if !store::delete_insight(&state.db, id).await? {
        return Err(AppError::NotFound("Insight not found".to_string()));
    }
    Ok(Json(Ack::done("Insight deleted successfully")))
}
