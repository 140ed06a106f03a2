use sqlx::{SqliteConnection, SqlitePool};

use crate::models::role::{RoleRow, RoleUpdate};

pub async fn list_roles(pool: &SqlitePool) -> Result<Vec<RoleRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleRow>("SELECT * FROM roles ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn get_role(pool: &SqlitePool, id: i64) -> Result<Option<RoleRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleRow>("SELECT * FROM roles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_role_by_name(pool: &SqlitePool, name: &str) -> Result<Option<RoleRow>, sqlx::Error> {
    sqlx::query_as::<_, RoleRow>("SELECT * FROM roles WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn insert_role(
    conn: &mut SqliteConnection,
    name: &str,
    description: &str,
    icon: &str,
    color: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO roles (name, description, icon, color) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(description)
        .bind(icon)
        .bind(color)
        .execute(&mut *conn)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Applies the present fields of `update`. Returns false when no row matched.
pub async fn update_role(pool: &SqlitePool, id: i64, update: &RoleUpdate) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE roles SET
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            icon = COALESCE(?, icon),
            color = COALESCE(?, color)
        WHERE id = ?
        "#,
    )
    .bind(update.name.as_deref())
    .bind(update.description.as_deref())
    .bind(update.icon.as_deref())
    .bind(update.color.as_deref())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Deletes a role; its questions and roadmap go with it via ON DELETE CASCADE.
pub async fn delete_role(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM roles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, seeded_memory_pool};

    #[tokio::test]
    async fn test_list_roles_sorted_by_name() {
        let pool = seeded_memory_pool().await;
        let roles = list_roles(&pool).await.unwrap();
        let names: Vec<_> = roles.iter().map(|r| r.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.first().map(String::as_str), Some("AI/ML Engineer"));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        let mut conn = pool.acquire().await.unwrap();
        let id = insert_role(&mut conn, "Tester", "Breaks things", "bug", "#111111")
            .await
            .unwrap();
        drop(conn);

        let update = RoleUpdate {
            icon: Some("wrench".into()),
            ..RoleUpdate::default()
        };
        assert!(update_role(&pool, id, &update).await.unwrap());

        let role = get_role(&pool, id).await.unwrap().unwrap();
        assert_eq!(role.icon, "wrench");
        assert_eq!(role.description, "Breaks things");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_questions() {
        let pool = seeded_memory_pool().await;
        let role = get_role_by_name(&pool, "Python Developer").await.unwrap().unwrap();

        assert!(delete_role(&pool, role.id).await.unwrap());

        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM interview_questions WHERE role_id = ?")
            .bind(role.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(orphans, 0);
        assert!(!delete_role(&pool, role.id).await.unwrap());
    }
}
