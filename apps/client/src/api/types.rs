//! Wire shapes exchanged with the NAVIQ API.
//!
//! Read types are lenient (`#[serde(default)]` on anything optional); input
//! types skip absent fields so partial updates only send what changed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty '{s}'"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub id: i64,
    pub question: String,
    #[serde(default)]
    pub answer: String,
    pub difficulty: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default, rename = "followUp", skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl InterviewQuestion {
    /// `None` when the server sent a difficulty this client doesn't know.
    pub fn level(&self) -> Option<Difficulty> {
        self.difficulty.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapMilestone {
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub outcomes: Vec<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub start_day: u32,
    #[serde(default)]
    pub end_day: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapWeek {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub focus: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub goal: String,
    pub days: u32,
    #[serde(default)]
    pub overview: String,
    pub milestones: Vec<RoadmapMilestone>,
    #[serde(default)]
    pub weeks: Vec<RoadmapWeek>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapGoal {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub overview: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyTopic {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub subhead: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub resources: Vec<StudyResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub meta: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Readiness,
    Velocity,
    Market,
}

impl InsightCategory {
    pub const ALL: [InsightCategory; 3] = [
        InsightCategory::Readiness,
        InsightCategory::Velocity,
        InsightCategory::Market,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InsightCategory::Readiness => "readiness",
            InsightCategory::Velocity => "velocity",
            InsightCategory::Market => "market",
        }
    }

    /// Heading shown above the category's cards.
    pub fn title(self) -> &'static str {
        match self {
            InsightCategory::Readiness => "Interview Readiness",
            InsightCategory::Velocity => "Learning Velocity",
            InsightCategory::Market => "Market Insights",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsightCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown insight category '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightGroups {
    #[serde(default)]
    pub readiness: Vec<Insight>,
    #[serde(default)]
    pub velocity: Vec<Insight>,
    #[serde(default)]
    pub market: Vec<Insight>,
}

impl InsightGroups {
    pub fn get(&self, category: InsightCategory) -> &[Insight] {
        match category {
            InsightCategory::Readiness => &self.readiness,
            InsightCategory::Velocity => &self.velocity,
            InsightCategory::Market => &self.market,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.readiness.is_empty() && self.velocity.is_empty() && self.market.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub id: Option<i64>,
    pub message: String,
}

// ──────────────────────────────────────────────
// Mutation bodies
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InsightInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StudyResourceInput {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StudyTopicInput {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subhead: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<StudyResourceInput>,
}
