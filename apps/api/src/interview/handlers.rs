use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::interview::store::{self, QuestionFields};
use crate::models::interview::{
    Difficulty, NewQuestion, QuestionCard, QuestionRow, QuestionUpdate, RoleQuery,
};
use crate::models::Ack;
use crate::roles::store as role_store;
use crate::state::AppState;

/// GET /api/interview?role=<name>
///
/// An unknown role is not an error: the view just shows an empty deck.
pub async fn handle_questions_for_role(
    State(state): State<AppState>,
    Query(params): Query<RoleQuery>,
) -> Result<Json<Vec<QuestionCard>>, AppError> {
    let role = params
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::Validation("Role parameter is required".to_string()))?;

    let rows = store::questions_for_role_name(&state.db, role).await?;
    debug!("Serving {} interview questions for '{role}'", rows.len());
    Ok(Json(rows.into_iter().map(QuestionCard::from).collect()))
}

/// GET /api/interview/role/:id
pub async fn handle_questions_by_role_id(
    State(state): State<AppState>,
    Path(role_id): Path<i64>,
) -> Result<Json<Vec<QuestionRow>>, AppError> {
    Ok(Json(store::questions_for_role_id(&state.db, role_id).await?))
}

/// POST /api/interview
pub async fn handle_create_question(
    State(state): State<AppState>,
    Json(req): Json<NewQuestion>,
) -> Result<(StatusCode, Json<Ack>), AppError> {
    let (role_id, question) = match (req.role_id, req.question.as_deref().map(str::trim)) {
        (Some(role_id), Some(q)) if !q.is_empty() => (role_id, q),
        _ => {
            return Err(AppError::Validation(
                "role_id and question are required".to_string(),
            ))
        }
    };

    let difficulty = match req.difficulty.as_deref() {
        Some(raw) => raw.parse::<Difficulty>().map_err(AppError::Validation)?,
        None => Difficulty::Intermediate,
    };

    if role_store::get_role(&state.db, role_id).await?.is_none() {
        return Err(AppError::NotFound("Role not found".to_string()));
    }

    let mut conn = state.db.acquire().await?;
    let id = store::insert_question(
        &mut conn,
        &QuestionFields {
            role_id,
            question,
            focus: req.focus.as_deref().unwrap_or(""),
            difficulty: difficulty.as_str(),
            answer: req.answer.as_deref().unwrap_or(""),
            follow_up: req.follow_up.as_deref().unwrap_or(""),
        },
    )
    .await?;

    info!("Created interview question {id} for role {role_id}");
    Ok((StatusCode::CREATED, Json(Ack::created(id, "Question"))))
}

/// PUT /api/interview/:id
pub async fn handle_update_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(mut req): Json<QuestionUpdate>,
) -> Result<Json<Ack>, AppError> {
    if req.is_empty() {
        return Err(AppError::Validation("No changes provided".to_string()));
    }
    if let Some(raw) = req.difficulty.take() {
        let parsed = raw.parse::<Difficulty>().map_err(AppError::Validation)?;
        req.difficulty = Some(parsed.as_str().to_string());
    }
    if !store::update_question(&state.db, id, &req).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }
    Ok(Json(Ack::done("Question updated successfully")))
}

/// DELETE /api/interview/:id
pub async fn handle_delete_question(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Ack>, AppError> {
    if !store::delete_question(&state.db, id).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }
    Ok(Json(Ack::done("Question deleted successfully")))
}
