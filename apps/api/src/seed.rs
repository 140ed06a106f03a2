//! Catalog seeding. The embedded `data/catalog.json` is loaded on first start
//! (or the file named by `SEED_FILE`) and written in a single transaction.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::insights::store as insight_store;
use crate::interview::store as question_store;
use crate::models::roadmap::Milestone;
use crate::roadmap::store as roadmap_store;
use crate::roles::store as role_store;
use crate::study::store as study_store;

const EMBEDDED_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub roles: Vec<SeedRole>,
    #[serde(default)]
    pub interview_questions: BTreeMap<String, Vec<SeedQuestion>>,
    #[serde(default)]
    pub roadmaps: BTreeMap<String, SeedRoadmap>,
    #[serde(default)]
    pub study_topics: Vec<SeedTopic>,
    #[serde(default)]
    pub insights: Vec<SeedInsight>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRole {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedQuestion {
    pub question: String,
    #[serde(default)]
    pub focus: String,
    pub difficulty: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub follow_up: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRoadmap {
    #[serde(default)]
    pub overview: String,
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedTopic {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub subhead: String,
    pub icon: String,
    #[serde(default)]
    pub resources: Vec<SeedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedResource {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedInsight {
    pub category: String,
    pub label: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub meta: String,
}

impl Catalog {
    pub fn embedded() -> Result<Self> {
        serde_json::from_str(EMBEDDED_CATALOG).context("Embedded catalog is not valid JSON")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Seed file {} is not a valid catalog", path.display()))
    }

    /// Picks the override file when configured, otherwise the embedded catalog.
    pub fn load(seed_file: Option<&Path>) -> Result<Self> {
        match seed_file {
            Some(path) => Self::from_file(path),
            None => Self::embedded(),
        }
    }
}

/// Summary of what a seeding run wrote.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub roles: usize,
    pub questions: usize,
    pub roadmaps: usize,
    pub topics: usize,
    pub insights: usize,
}

/// Writes the catalog if the `roles` table is empty. Returns `None` when the
/// database already holds data.
pub async fn seed_if_empty(pool: &SqlitePool, catalog: &Catalog) -> Result<Option<SeedReport>> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM roles")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!("Database already seeded ({existing} roles), skipping");
        return Ok(None);
    }

    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();
    let mut role_ids = BTreeMap::new();

    for role in &catalog.roles {
        let id = role_store::insert_role(
            &mut tx,
            &role.name,
            &role.description,
            &role.icon,
            &role.color,
        )
        .await
        .with_context(|| format!("Failed to seed role '{}'", role.name))?;
        role_ids.insert(role.name.as_str(), id);
        report.roles += 1;
    }

    for (role_name, questions) in &catalog.interview_questions {
        let role_id = *role_ids
            .get(role_name.as_str())
            .with_context(|| format!("Questions reference unknown role '{role_name}'"))?;
        for q in questions {
            question_store::insert_question(
                &mut tx,
                &question_store::QuestionFields {
                    role_id,
                    question: &q.question,
                    focus: &q.focus,
                    difficulty: &q.difficulty,
                    answer: &q.answer,
                    follow_up: &q.follow_up,
                },
            )
            .await?;
            report.questions += 1;
        }
    }

    for (role_name, roadmap) in &catalog.roadmaps {
        let role_id = *role_ids
            .get(role_name.as_str())
            .with_context(|| format!("Roadmap references unknown role '{role_name}'"))?;
        roadmap_store::insert_roadmap(&mut tx, role_id, &roadmap.overview, &roadmap.milestones)
            .await?;
        report.roadmaps += 1;
    }

    for topic in &catalog.study_topics {
        let topic_id = study_store::insert_topic(
            &mut tx,
            &topic.title,
            &topic.summary,
            &topic.subhead,
            &topic.icon,
        )
        .await?;
        for res in &topic.resources {
            study_store::insert_resource(&mut tx, topic_id, &res.kind, &res.title, &res.detail, &res.url)
                .await?;
        }
        report.topics += 1;
    }

    for insight in &catalog.insights {
        insight_store::insert_insight(
            &mut tx,
            &insight.category,
            &insight.label,
            &insight.value,
            &insight.meta,
        )
        .await?;
        report.insights += 1;
    }

    tx.commit().await?;

    info!(
        "Seeded catalog: {} roles, {} questions, {} roadmaps, {} topics, {} insights",
        report.roles, report.questions, report.roadmaps, report.topics, report.insights
    );
    Ok(Some(report))
}
