use axum::{
    extract::State,
    routing::{delete, get, post},
    Router,
};
use sqlx::SqlitePool;

use crate::server::app::AppState;
use crate::server::deserializers::PageQuery;
use crate::trivia::mapper::{
    CreatedQuestion, DeletedQuestion, NewQuestionPayload, QuestionPage, SearchPayload,
    SearchResults,
};
use crate::trivia::{mutation, QueryEngine};

use super::{ApiJson, ApiPath, ApiQuery, ApiResponse, Envelope};

async fn get_questions(
    State(engine): State<QueryEngine>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<QuestionPage> {
    Ok(Envelope(engine.list(query.page()).await?))
}

async fn search_questions(
    State(engine): State<QueryEngine>,
    ApiJson(payload): ApiJson<SearchPayload>,
) -> ApiResponse<SearchResults> {
    let term = payload.term()?;
    Ok(Envelope(engine.search(term).await?))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(payload): ApiJson<NewQuestionPayload>,
) -> ApiResponse<CreatedQuestion> {
    let new_question = payload.validate()?;
    let question = mutation::create_question(&pool, new_question).await?;
    Ok(Envelope(CreatedQuestion { question }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<DeletedQuestion> {
    let id = mutation::delete_question(&pool, id).await?;
    Ok(Envelope(DeletedQuestion::new(id)))
}

pub fn questions_router() -> Router<AppState> {
    Router::new()
        .route("/api/questions", get(get_questions).post(create_question))
        .route("/api/questions/search", post(search_questions))
        .route("/api/questions/{id}", delete(delete_question))
}
