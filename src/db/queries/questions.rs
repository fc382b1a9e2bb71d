use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection, SqliteExecutor, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

/// A question that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl NewQuestion {
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

pub async fn get_all_questions<'e, E>(executor: E) -> sqlx::Result<Vec<Question>>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(executor)
    .await
}

/// All questions, or only those of `category` when it is set.
pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category: Option<i64>,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE ?1 IS NULL OR questions.category = ?1
        ORDER BY id
        "#,
    )
    .bind(category)
    .fetch_all(pool)
    .await
}

pub async fn count_questions(pool: &SqlitePool, category: Option<i64>) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM questions WHERE ?1 IS NULL OR questions.category = ?1
        "#,
    )
    .bind(category)
    .fetch_one(pool)
    .await
}

pub async fn get_questions_page(
    pool: &SqlitePool,
    category: Option<i64>,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE ?1 IS NULL OR questions.category = ?1
        ORDER BY id
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(category)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Questions whose text contains `term`, compared after Unicode lowercasing.
///
/// SQLite `LIKE` folds ASCII only, so matching happens here instead of in SQL.
pub async fn search_questions(pool: &SqlitePool, term: &str) -> sqlx::Result<Vec<Question>> {
    let needle = term.to_lowercase();
    let mut questions = get_all_questions(pool).await?;
    questions.retain(|q| q.question.to_lowercase().contains(&needle));
    Ok(questions)
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(pool)
    .await?
    .last_insert_rowid();

    Ok(id)
}

/// Inserts a question keeping its id, used by imports.
pub async fn insert_question<'e, E>(executor: E, question: &Question) -> sqlx::Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let id = sqlx::query(
        r#"
        INSERT INTO questions (id, question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(question.id)
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .execute(executor)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_question<'e, E>(executor: E, question: &Question) -> sqlx::Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        UPDATE questions SET question=?1, answer=?2, category=?3, difficulty=?4 WHERE questions.id = ?5
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category)
    .bind(question.difficulty)
    .bind(question.id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Returns the number of deleted rows.
pub async fn delete_question<'e, E>(executor: E, id: i64) -> sqlx::Result<u64>
where
    E: SqliteExecutor<'e>,
{
    let deleted = sqlx::query(
        r#"
        DELETE FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .execute(executor)
    .await?
    .rows_affected();
    Ok(deleted)
}

/// Makes the stored questions match `questions` exactly, keyed by id.
pub async fn import_questions(
    conn: &mut SqliteConnection,
    questions: Vec<Question>,
) -> sqlx::Result<()> {
    let existing_ids: HashSet<i64> = get_all_questions(&mut *conn)
        .await?
        .iter()
        .map(|q| q.id)
        .collect();
    let new_ids: HashSet<i64> = questions.iter().map(|q| q.id).collect();
    for id in existing_ids.difference(&new_ids) {
        delete_question(&mut *conn, *id).await?;
    }
    for question in questions {
        if existing_ids.contains(&question.id) {
            update_question(&mut *conn, &question).await?;
        } else {
            insert_question(&mut *conn, &question).await?;
        }
    }
    Ok(())
}
