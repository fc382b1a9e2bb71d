use axum::{extract::State, routing::post, Router};

use crate::server::app::AppState;
use crate::trivia::mapper::{QuizDraw, QuizPayload};
use crate::trivia::{QuizRequest, QuizSelector};

use super::{ApiJson, ApiResponse, Envelope};

async fn next_question(
    State(selector): State<QuizSelector>,
    ApiJson(payload): ApiJson<QuizPayload>,
) -> ApiResponse<QuizDraw> {
    let request = QuizRequest::from(payload);
    let question = selector.draw(&request).await?;
    Ok(Envelope(QuizDraw { question }))
}

pub fn quizzes_router() -> Router<AppState> {
    Router::new().route("/api/quizzes", post(next_question))
}
