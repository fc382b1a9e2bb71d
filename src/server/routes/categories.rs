use axum::{extract::State, routing::get, Router};

use crate::server::app::AppState;
use crate::server::deserializers::PageQuery;
use crate::trivia::mapper::{CategoryListing, CategoryQuestionPage};
use crate::trivia::QueryEngine;

use super::{ApiPath, ApiQuery, ApiResponse, Envelope};

async fn get_categories(State(engine): State<QueryEngine>) -> ApiResponse<CategoryListing> {
    let categories = engine.list_categories().await?;
    Ok(Envelope(CategoryListing { categories }))
}

async fn get_category_questions(
    State(engine): State<QueryEngine>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<CategoryQuestionPage> {
    Ok(Envelope(engine.list_by_category(id, query.page()).await?))
}

pub fn category_router() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(get_categories))
        .route("/api/categories/{id}/questions", get(get_category_questions))
}
