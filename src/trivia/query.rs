use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};

use super::error::{Error, Result};
use super::mapper::{
    CategoryMap, CategoryQuestionPage, CurrentCategory, QuestionPage, SearchResults,
};
use super::pagination::Pagination;

/// Read side of the question bank. Every listing is ordered by ascending question id.
#[derive(Clone)]
pub struct QueryEngine {
    pool: SqlitePool,
    pagination: Pagination,
}

impl QueryEngine {
    pub fn new(pool: SqlitePool, pagination: Pagination) -> Self {
        Self { pool, pagination }
    }

    pub async fn list_categories(&self) -> Result<CategoryMap> {
        let categories = categories::get_all_categories(&self.pool).await?;
        Ok(categories.into_iter().collect())
    }

    pub async fn list(&self, page: i64) -> Result<QuestionPage> {
        let total = questions::count_questions(&self.pool, None).await?;
        let window = self.pagination.window(page, total)?;
        let questions =
            questions::get_questions_page(&self.pool, None, window.limit, window.offset).await?;
        Ok(QuestionPage {
            questions,
            total_questions: total,
            categories: self.list_categories().await?,
            current_category: CurrentCategory::All,
        })
    }

    pub async fn search(&self, term: &str) -> Result<SearchResults> {
        if term.is_empty() {
            return Err(Error::EmptySearchTerm);
        }
        let questions = questions::search_questions(&self.pool, term).await?;
        tracing::debug!(term, found = questions.len(), "Searched questions");
        Ok(SearchResults {
            total_questions: questions.len() as i64,
            questions,
            current_category: CurrentCategory::All,
        })
    }

    pub async fn list_by_category(
        &self,
        category_id: i64,
        page: i64,
    ) -> Result<CategoryQuestionPage> {
        let category = categories::get_category(&self.pool, category_id)
            .await?
            .ok_or(Error::UnknownCategory(category_id))?;
        let total = questions::count_questions(&self.pool, Some(category_id)).await?;
        let window = self.pagination.window(page, total)?;
        let questions = questions::get_questions_page(
            &self.pool,
            Some(category_id),
            window.limit,
            window.offset,
        )
        .await?;
        Ok(CategoryQuestionPage {
            questions,
            total_questions: total,
            current_category: CurrentCategory::Named(category.kind),
        })
    }
}
