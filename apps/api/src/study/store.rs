use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use crate::models::study::{StudyResource, StudyTopic, TopicRow};

/// All topics ordered by title, each with its resources ordered by title.
pub async fn list_topics(pool: &SqlitePool) -> Result<Vec<StudyTopic>, sqlx::Error> {
    let topics = sqlx::query_as::<_, TopicRow>(
        "SELECT id, title, summary, subhead, icon FROM study_topics ORDER BY title, id",
    )
    .fetch_all(pool)
    .await?;

    let resources = sqlx::query_as::<_, StudyResource>(
        "SELECT topic_id, type, title, detail, url FROM study_resources ORDER BY title, id",
    )
    .fetch_all(pool)
    .await?;

    let mut by_topic: HashMap<i64, Vec<StudyResource>> = HashMap::new();
    for resource in resources {
        by_topic.entry(resource.topic_id).or_default().push(resource);
    }

    Ok(topics
        .into_iter()
        .map(|t| StudyTopic {
            resources: by_topic.remove(&t.id).unwrap_or_default(),
            id: t.id,
            title: t.title,
            summary: t.summary,
            subhead: t.subhead,
            icon: t.icon,
        })
        .collect())
}

pub async fn insert_topic(
    conn: &mut SqliteConnection,
    title: &str,
    summary: &str,
    subhead: &str,
    icon: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO study_topics (title, summary, subhead, icon) VALUES (?, ?, ?, ?)")
        .bind(title)
        .bind(summary)
        .bind(subhead)
        .bind(icon)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn insert_resource(
    conn: &mut SqliteConnection,
    topic_id: i64,
    kind: &str,
    title: &str,
    detail: &str,
    url: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO study_resources (topic_id, type, title, detail, url) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(topic_id)
    .bind(kind)
    .bind(title)
    .bind(detail)
    .bind(url)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Removes a topic; its resources cascade.
pub async fn delete_topic(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM study_topics WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
