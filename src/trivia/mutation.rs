use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::{NewQuestion, Question};

use super::error::{Error, Result};

/// Stores a validated question and returns it with its new id.
pub async fn create_question(pool: &SqlitePool, new_question: NewQuestion) -> Result<Question> {
    let id = questions::create_question(pool, &new_question)
        .await
        .map_err(Error::Unprocessable)?;
    tracing::info!(id, category = new_question.category, "Created question");
    Ok(new_question.with_id(id))
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> Result<i64> {
    if questions::get_question_by_id(pool, id).await?.is_none() {
        return Err(Error::QuestionGone(id));
    }
    // a concurrent delete may have won the race
    if questions::delete_question(pool, id).await? == 0 {
        return Err(Error::QuestionGone(id));
    }
    tracing::info!(id, "Deleted question");
    Ok(id)
}
