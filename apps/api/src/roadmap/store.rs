use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use crate::models::roadmap::{Milestone, MilestoneRow, RoadmapGoal, RoadmapRow, StoredRoadmap};

/// Writes a roadmap and its ordered milestones. `order_index` follows the
/// slice order.
pub async fn insert_roadmap(
    conn: &mut SqliteConnection,
    role_id: i64,
    overview: &str,
    milestones: &[Milestone],
) -> Result<i64, sqlx::Error> {
    let roadmap_id = sqlx::query("INSERT INTO roadmaps (role_id, overview) VALUES (?, ?)")
        .bind(role_id)
        .bind(overview)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    for (index, milestone) in milestones.iter().enumerate() {
        let milestone_id = sqlx::query(
            "INSERT INTO milestones (roadmap_id, title, details, order_index) VALUES (?, ?, ?, ?)",
        )
        .bind(roadmap_id)
        .bind(&milestone.title)
        .bind(&milestone.details)
        .bind(index as i64)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

        for outcome in &milestone.outcomes {
            sqlx::query("INSERT INTO milestone_outcomes (milestone_id, outcome) VALUES (?, ?)")
                .bind(milestone_id)
                .bind(outcome)
                .execute(&mut *conn)
                .await?;
        }
        for resource in &milestone.resources {
            sqlx::query("INSERT INTO milestone_resources (milestone_id, resource) VALUES (?, ?)")
                .bind(milestone_id)
                .bind(resource)
                .execute(&mut *conn)
                .await?;
        }
    }

    Ok(roadmap_id)
}

/// Loads the roadmap attached to the role named `goal`, milestones in order.
pub async fn roadmap_for_role(pool: &SqlitePool, goal: &str) -> Result<Option<StoredRoadmap>, sqlx::Error> {
    let Some(roadmap) = sqlx::query_as::<_, RoadmapRow>(
        "SELECT rm.id, rm.overview FROM roadmaps rm JOIN roles r ON rm.role_id = r.id WHERE r.name = ?",
    )
    .bind(goal)
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };

    let rows = sqlx::query_as::<_, MilestoneRow>(
        "SELECT id, title, details FROM milestones WHERE roadmap_id = ? ORDER BY order_index, id",
    )
    .bind(roadmap.id)
    .fetch_all(pool)
    .await?;

    let mut outcomes = child_lists(pool, "milestone_outcomes", "outcome", roadmap.id).await?;
    let mut resources = child_lists(pool, "milestone_resources", "resource", roadmap.id).await?;

    let milestones = rows
        .into_iter()
        .map(|row| Milestone {
            outcomes: outcomes.remove(&row.id).unwrap_or_default(),
            resources: resources.remove(&row.id).unwrap_or_default(),
            title: row.title,
            details: row.details,
        })
        .collect();

    Ok(Some(StoredRoadmap {
        overview: roadmap.overview,
        milestones,
    }))
}

/// Reads one of the milestone child tables for a whole roadmap, grouped by
/// milestone id in insertion order.
async fn child_lists(
    pool: &SqlitePool,
    table: &str,
    column: &str,
    roadmap_id: i64,
) -> Result<HashMap<i64, Vec<String>>, sqlx::Error> {
    let sql = format!(
        "SELECT c.milestone_id, c.{column} FROM {table} c \
         JOIN milestones m ON c.milestone_id = m.id \
         WHERE m.roadmap_id = ? ORDER BY c.id"
    );
    let pairs = sqlx::query_as::<_, (i64, String)>(&sql)
        .bind(roadmap_id)
        .fetch_all(pool)
        .await?;

    let mut grouped: HashMap<i64, Vec<String>> = HashMap::new();
    for (milestone_id, value) in pairs {
        grouped.entry(milestone_id).or_default().push(value);
    }
    Ok(grouped)
}

pub async fn list_goals(pool: &SqlitePool) -> Result<Vec<RoadmapGoal>, sqlx::Error> {
    sqlx::query_as::<_, RoadmapGoal>(
        r#"
        SELECT r.name, r.icon, r.color, rm.overview
        FROM roadmaps rm
        JOIN roles r ON rm.role_id = r.id
        ORDER BY r.name
        "#,
    )
    .fetch_all(pool)
    .await
}
