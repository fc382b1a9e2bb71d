//! Next-question selection for quiz sessions.
//!
//! The server keeps no session: the client sends the ids it has already been shown with every
//! draw, and those are excluded from the pool.
use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::telemetry::QUIZ_DRAWS;

use super::error::{Error, Result};

/// Category id meaning "every category".
pub const ALL_CATEGORIES: i64 = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizRequest {
    pub category: i64,
    pub previous_questions: HashSet<i64>,
}

impl QuizRequest {
    fn scope(&self) -> Option<i64> {
        (self.category != ALL_CATEGORIES).then_some(self.category)
    }
}

/// Drops every question whose id was already asked.
pub fn eligible_pool(pool: Vec<Question>, previous: &HashSet<i64>) -> Vec<Question> {
    pool.into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect()
}

/// Uniform choice over `eligible`, `None` when it is empty.
pub fn pick<'a, R: Rng + ?Sized>(eligible: &'a [Question], rng: &mut R) -> Option<&'a Question> {
    eligible.choose(rng)
}

#[derive(Clone)]
pub struct QuizSelector {
    pool: SqlitePool,
}

impl QuizSelector {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Questions that may still be asked in this session, in id order.
    ///
    /// A category other than [`ALL_CATEGORIES`] has to exist.
    pub async fn eligible(&self, request: &QuizRequest) -> Result<Vec<Question>> {
        let scope = request.scope();
        if let Some(id) = scope {
            categories::get_category(&self.pool, id)
                .await?
                .ok_or(Error::UnknownCategory(id))?;
        }
        let pool = questions::get_questions_for_category(&self.pool, scope).await?;
        Ok(eligible_pool(pool, &request.previous_questions))
    }

    #[tracing::instrument(skip(self, request), fields(category = request.category, asked = request.previous_questions.len()))]
    pub async fn draw(&self, request: &QuizRequest) -> Result<Option<Question>> {
        let eligible = self.eligible(request).await?;
        let question = pick(&eligible, &mut rand::thread_rng()).cloned();
        match &question {
            Some(q) => {
                QUIZ_DRAWS.with_label_values(&["question"]).inc();
                tracing::debug!(question = q.id, remaining = eligible.len() - 1, "Drew question");
            }
            None => {
                QUIZ_DRAWS.with_label_values(&["exhausted"]).inc();
                tracing::debug!("No questions left");
            }
        }
        Ok(question)
    }
}
