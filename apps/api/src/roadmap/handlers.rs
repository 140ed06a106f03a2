use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::models::roadmap::{RoadmapGoal, RoadmapQuery, RoadmapResponse};
use crate::roadmap::{schedule, store};
use crate::state::AppState;

/// GET /api/roadmap?goal=<role>&days=<n>
pub async fn handle_roadmap(
    State(state): State<AppState>,
    Query(params): Query<RoadmapQuery>,
) -> Result<Json<RoadmapResponse>, AppError> {
    let goal = params
        .goal
        .as_deref()
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .ok_or_else(|| AppError::Validation("Goal parameter is required".to_string()))?;
    let requested = schedule::parse_days(params.days.as_deref());

    let stored = store::roadmap_for_role(&state.db, goal)
        .await?
        .ok_or_else(|| AppError::NotFound("Roadmap not found for this goal".to_string()))?;

    let roadmap = schedule::build_roadmap(goal, requested, stored);
    debug!(
        "Roadmap for '{goal}': {} milestones over {} days",
        roadmap.milestones.len(),
        roadmap.days
    );
    Ok(Json(roadmap))
}

/// GET /api/roadmap/goals
pub async fn handle_goals(State(state): State<AppState>) -> Result<Json<Vec<RoadmapGoal>>, AppError> {
    Ok(Json(store::list_goals(&state.db).await?))
}
