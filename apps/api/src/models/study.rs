use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_TOPIC_ICON: &str = "book";
pub const DEFAULT_RESOURCE_TYPE: &str = "Docs";

#[derive(Debug, Clone, FromRow)]
pub struct TopicRow {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub subhead: String,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudyResource {
    #[serde(skip)]
    pub topic_id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub title: String,
    pub detail: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyTopic {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub subhead: String,
    pub icon: String,
    pub resources: Vec<StudyResource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudyResource {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudyTopic {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub subhead: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub resources: Vec<NewStudyResource>,
}
