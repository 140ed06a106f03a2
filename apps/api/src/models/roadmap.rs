use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct RoadmapRow {
    pub id: i64,
    pub overview: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct MilestoneRow {
    pub id: i64,
    pub title: String,
    pub details: String,
}

/// A milestone with its outcomes and resources, before any schedule is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub title: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct StoredRoadmap {
    pub overview: String,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMilestone {
    pub title: String,
    pub details: String,
    pub outcomes: Vec<String>,
    pub resources: Vec<String>,
    pub start_day: u32,
    pub end_day: u32,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapWeek {
    pub title: String,
    pub summary: String,
    pub focus: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapResponse {
    pub goal: String,
    pub days: u32,
    pub overview: String,
    pub milestones: Vec<ScheduledMilestone>,
    pub weeks: Vec<RoadmapWeek>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoadmapGoal {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub overview: String,
}

#[derive(Debug, Deserialize)]
pub struct RoadmapQuery {
    pub goal: Option<String>,
    pub days: Option<String>,
}
