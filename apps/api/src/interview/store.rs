use sqlx::{SqliteConnection, SqlitePool};

use crate::models::interview::{QuestionRow, QuestionUpdate};

/// Orders Beginner → Intermediate → Advanced, then by focus area.
const DIFFICULTY_ORDER: &str = r#"
    CASE iq.difficulty
        WHEN 'Beginner' THEN 0
        WHEN 'Intermediate' THEN 1
        ELSE 2
    END, iq.focus, iq.id
"#;

pub struct QuestionFields<'a> {
    pub role_id: i64,
    pub question: &'a str,
    pub focus: &'a str,
    pub difficulty: &'a str,
    pub answer: &'a str,
    pub follow_up: &'a str,
}

pub async fn questions_for_role_name(
    pool: &SqlitePool,
    role_name: &str,
) -> Result<Vec<QuestionRow>, sqlx::Error> {
    let sql = format!(
        "SELECT iq.* FROM interview_questions iq \
         JOIN roles r ON iq.role_id = r.id \
         WHERE r.name = ? ORDER BY {DIFFICULTY_ORDER}"
    );
    sqlx::query_as::<_, QuestionRow>(&sql)
        .bind(role_name)
        .fetch_all(pool)
        .await
}

pub async fn questions_for_role_id(pool: &SqlitePool, role_id: i64) -> Result<Vec<QuestionRow>, sqlx::Error> {
    let sql = format!("SELECT iq.* FROM interview_questions iq WHERE iq.role_id = ? ORDER BY {DIFFICULTY_ORDER}");
    sqlx::query_as::<_, QuestionRow>(&sql)
        .bind(role_id)
        .fetch_all(pool)
        .await
}

pub async fn insert_question(conn: &mut SqliteConnection, q: &QuestionFields<'_>) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO interview_questions (role_id, question, focus, difficulty, answer, follow_up)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(q.role_id)
    .bind(q.question)
    .bind(q.focus)
    .bind(q.difficulty)
    .bind(q.answer)
    .bind(q.follow_up)
    .execute(&mut *conn)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_question(pool: &SqlitePool, id: i64, update: &QuestionUpdate) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE interview_questions SET
            question = COALESCE(?, question),
            focus = COALESCE(?, focus),
            difficulty = COALESCE(?, difficulty),
            answer = COALESCE(?, answer),
            follow_up = COALESCE(?, follow_up)
        WHERE id = ?
        "#,
    )
    .bind(update.question.as_deref())
    .bind(update.focus.as_deref())
    .bind(update.difficulty.as_deref())
    .bind(update.answer.as_deref())
    .bind(update.follow_up.as_deref())
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM interview_questions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
