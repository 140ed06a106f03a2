use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
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
            .ok_or_else(|| "Difficulty must be Beginner, Intermediate, or Advanced".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub role_id: i64,
    pub question: String,
    pub focus: String,
    pub difficulty: String,
    pub answer: String,
    pub follow_up: String,
    pub created_at: NaiveDateTime,
}

/// Question card as the interview view consumes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCard {
    pub id: i64,
    pub question: String,
    pub focus: String,
    pub difficulty: String,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

impl From<QuestionRow> for QuestionCard {
    fn from(row: QuestionRow) -> Self {
        QuestionCard {
            id: row.id,
            question: row.question,
            focus: row.focus,
            difficulty: row.difficulty,
            answer: row.answer,
            follow_up: Some(row.follow_up).filter(|f| !f.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RoleQuery {
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewQuestion {
    pub role_id: Option<i64>,
    pub question: Option<String>,
    pub focus: Option<String>,
    pub difficulty: Option<String>,
    pub answer: Option<String>,
    #[serde(alias = "followUp")]
    pub follow_up: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionUpdate {
    pub question: Option<String>,
    pub focus: Option<String>,
    pub difficulty: Option<String>,
    pub answer: Option<String>,
    #[serde(alias = "followUp")]
    pub follow_up: Option<String>,
}

impl QuestionUpdate {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.focus.is_none()
            && self.difficulty.is_none()
            && self.answer.is_none()
            && self.follow_up.is_none()
    }
}
