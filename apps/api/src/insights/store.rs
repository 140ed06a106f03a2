use sqlx::{SqliteConnection, SqlitePool};

use crate::models::insight::{InsightCategory, InsightRow, InsightUpdate};

pub async fn list_insights(
    pool: &SqlitePool,
    category: Option<InsightCategory>,
) -> Result<Vec<InsightRow>, sqlx::Error> {
    match category {
        Some(category) => {
            sqlx::query_as::<_, InsightRow>(
                "SELECT id, category, label, value, meta FROM career_insights WHERE category = ? ORDER BY id",
            )
            .bind(category.as_str())
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, InsightRow>(
                "SELECT id, category, label, value, meta FROM career_insights ORDER BY category, id",
            )
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn insert_insight(
    conn: &mut SqliteConnection,
    category: &str,
    label: &str,
    value: &str,
    meta: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO career_insights (category, label, value, meta) VALUES (?, ?, ?, ?)")
        .bind(category)
        .bind(label)
        .bind(value)
        .bind(meta)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_insight(pool: &SqlitePool, id: i64, update: &InsightUpdate) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE career_insights SET
            category = COALESCE(?, category),
            label = COALESCE(?, label),
            value = COALESCE(?, value),
            meta = COALESCE(?, meta)
        WHERE id = ?
        "#,
    )
    .bind(update.category.as_deref())
    .bind(update.label.as_deref())
    .bind(update.value.as_deref())
    .bind(update.meta.as_deref())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_insight(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM career_insights WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seeded_memory_pool;

    #[tokio::test]
    async fn test_filter_by_category() {
        let pool = seeded_memory_pool().await;
        let market = list_insights(&pool, Some(InsightCategory::Market)).await.unwrap();
        assert_eq!(market.len(), 3);
        assert!(market.iter().all(|i| i.category == "market"));

        let all = list_insights(&pool, None).await.unwrap();
        assert_eq!(all.len(), 9);
    }

    #[tokio::test]
    async fn test_update_moves_category() {
        let pool = seeded_memory_pool().await;
        let first = list_insights(&pool, Some(InsightCategory::Readiness)).await.unwrap().remove(0);

        let update = InsightUpdate {
            category: Some("velocity".into()),
            value: Some("99%".into()),
            ..InsightUpdate::default()
        };
        assert!(update_insight(&pool, first.id, &update).await.unwrap());

        let velocity = list_insights(&pool, Some(InsightCategory::Velocity)).await.unwrap();
        let moved = velocity.iter().find(|i| i.id == first.id).unwrap();
        assert_eq!(moved.value, "99%");
        assert_eq!(moved.label, first.label);
    }

    #[tokio::test]
    async fn test_delete_missing_insight() {
        let pool = seeded_memory_pool().await;
        assert!(!delete_insight(&pool, 9999).await.unwrap());
    }
}
