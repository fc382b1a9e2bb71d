use axum::body::Body;
use axum::http::header;
use axum::response::Response;
use axum::{extract::FromRef, http::StatusCode, routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::trivia::{ErrorKind, Pagination, QueryEngine, QuizSelector};

use super::routes::{self, ApiError};

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
    engine: QueryEngine,
    selector: QuizSelector,
}

impl AppState {
    pub fn new(pool: SqlitePool, pagination: Pagination) -> Self {
        Self {
            engine: QueryEngine::new(pool.clone(), pagination),
            selector: QuizSelector::new(pool.clone()),
            pool,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router())
        .merge(questions_router())
        .merge(quizzes_router())
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(addr: &str, state: AppState) -> anyhow::Result<()> {
    let app = router(state);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics() -> Result<Response, ApiError> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).map_err(|err| {
        tracing::error!("Cannot encode metrics: {err}");
        ApiError::from(ErrorKind::Internal)
    })?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .map_err(|err| {
            tracing::error!("Cannot build metrics response: {err}");
            ApiError::from(ErrorKind::Internal)
        })
}
