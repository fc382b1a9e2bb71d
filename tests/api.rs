use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use trivia_api::db::queries::categories::insert_category;
use trivia_api::db::queries::questions::insert_question;
use trivia_api::db::{self, Category, Question};
use trivia_api::server::app::{router, AppState};
use trivia_api::trivia::Pagination;

async fn seeded_pool() -> SqlitePool {
    let pool = db::connect_in_memory().await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    for (id, kind) in [(1, "Science"), (2, "Art"), (3, "Geography")] {
        insert_category(
            &pool,
            &Category {
                id,
                kind: kind.to_owned(),
            },
        )
        .await
        .unwrap();
    }
    let questions = [
        (10, 1, "What is the chemical symbol for gold?"),
        (11, 1, "What planet is known as the Red Planet?"),
        (12, 1, "How many bones are in the human body?"),
    ]
    .into_iter()
    .map(|(id, category, text)| (id, category, text.to_owned()))
    .chain((20..35).map(|id| (id, 2, format!("Who painted picture number {id}?"))));
    for (id, category, question) in questions {
        insert_question(
            &pool,
            &Question {
                id,
                question,
                answer: format!("answer {id}"),
                category,
                difficulty: 2,
            },
        )
        .await
        .unwrap();
    }
    pool
}

async fn app() -> Router {
    router(AppState::new(seeded_pool().await, Pagination::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

fn ids(body: &Value) -> Vec<i64> {
    body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}

fn assert_error(status: StatusCode, body: &Value, code: u16, message: &str) {
    assert_eq!(status.as_u16(), code);
    assert_eq!(
        body,
        &json!({"success": false, "error": code, "message": message})
    );
}

#[tokio::test]
async fn lists_categories() {
    let app = app().await;
    let (status, body) = get(&app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "categories": {"1": "Science", "2": "Art", "3": "Geography"}
        })
    );
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let app = app().await;
    let (status, body) = post(&app, "/api/categories", json!({})).await;
    assert_error(status, &body, 405, "method not allowed");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app().await;
    let (status, body) = get(&app, "/api/nothing-here").await;
    assert_error(status, &body, 404, "resource not found");
}

#[tokio::test]
async fn lists_first_page_by_default() {
    let app = app().await;
    let (status, body) = get(&app, "/api/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(ids(&body), vec![10, 11, 12, 20, 21, 22, 23, 24, 25, 26]);
    assert_eq!(body["total_questions"], json!(18));
    assert_eq!(body["current_category"], Value::Null);
    assert_eq!(body["categories"]["2"], json!("Art"));

    let (_, garbage) = get(&app, "/api/questions?page=abc").await;
    assert_eq!(garbage, body);
}

#[tokio::test]
async fn pages_partition_all_questions() {
    let app = app().await;
    let (_, first) = get(&app, "/api/questions?page=1").await;
    let (status, second) = get(&app, "/api/questions?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&second), (27..35).collect::<Vec<_>>());
    assert_eq!(second["total_questions"], json!(18));
    assert_eq!(ids(&first).len() + ids(&second).len(), 18);
}

#[tokio::test]
async fn page_beyond_the_end_is_not_found() {
    let app = app().await;
    let (status, body) = get(&app, "/api/questions?page=1000").await;
    assert_error(status, &body, 404, "resource not found");
    let (status, body) = get(&app, "/api/questions?page=0").await;
    assert_error(status, &body, 404, "resource not found");
}

#[tokio::test]
async fn lists_questions_of_a_category() {
    let app = app().await;
    let (status, body) = get(&app, "/api/categories/1/questions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![10, 11, 12]);
    assert_eq!(body["total_questions"], json!(3));
    assert_eq!(body["current_category"], json!("Science"));

    let (status, body) = get(&app, "/api/categories/2/questions?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), (30..35).collect::<Vec<_>>());
    assert_eq!(body["total_questions"], json!(15));
}

#[tokio::test]
async fn category_listing_enforces_bounds() {
    let app = app().await;
    let (status, body) = get(&app, "/api/categories/1/questions?page=2").await;
    assert_error(status, &body, 404, "resource not found");
    let (status, body) = get(&app, "/api/categories/99/questions").await;
    assert_error(status, &body, 404, "resource not found");
    let (status, body) = get(&app, "/api/categories/abc/questions").await;
    assert_error(status, &body, 404, "resource not found");
}

#[tokio::test]
async fn search_ignores_case() {
    let app = app().await;
    let (status, lower) = post(&app, "/api/questions/search", json!({"searchTerm": "what"})).await;
    assert_eq!(status, StatusCode::OK);
    let (_, upper) = post(&app, "/api/questions/search", json!({"searchTerm": "WHAT"})).await;
    assert_eq!(ids(&lower), vec![10, 11]);
    assert_eq!(lower, upper);
    assert_eq!(lower["total_questions"], json!(2));
    assert_eq!(lower["current_category"], Value::Null);
}

#[tokio::test]
async fn search_without_term_is_bad_request() {
    let app = app().await;
    for body in [json!({"searchTerm": ""}), json!({}), json!({"searchTerm": null})] {
        let (status, response) = post(&app, "/api/questions/search", body).await;
        assert_error(status, &response, 400, "bad request");
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/questions")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn creates_question() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/questions",
        json!({
            "question": "Why did the dog cross the road?",
            "answer": "To get to the other side",
            "category": "3",
            "difficulty": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let question = &body["question"];
    assert!(question["id"].as_i64().unwrap() > 34);
    assert_eq!(question["category"], json!(3));
    assert_eq!(question["answer"], json!("To get to the other side"));

    let (_, listing) = get(&app, "/api/categories/3/questions").await;
    assert_eq!(listing["questions"][0], *question);
}

#[tokio::test]
async fn create_with_any_field_missing_is_bad_request() {
    let app = app().await;
    let complete = json!({
        "question": "Why did the dog cross the road?",
        "answer": "To get to the other side",
        "category": 5,
        "difficulty": 1
    });
    for field in ["question", "answer", "category", "difficulty"] {
        let mut body = complete.clone();
        body.as_object_mut().unwrap().remove(field);
        let (status, response) = post(&app, "/api/questions", body).await;
        assert_error(status, &response, 400, "bad request");
    }
    let (_, listing) = get(&app, "/api/questions").await;
    assert_eq!(listing["total_questions"], json!(18));
}

#[tokio::test]
async fn deletes_question_once() {
    let app = app().await;
    let (status, body) = send(&app, Method::DELETE, "/api/questions/10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "status": "OK", "question_id": 10})
    );

    let (status, body) = send(&app, Method::DELETE, "/api/questions/10", None).await;
    assert_error(status, &body, 410, "resource gone");
}

#[tokio::test]
async fn deleting_unknown_question_is_gone() {
    let app = app().await;
    let (status, body) = send(&app, Method::DELETE, "/api/questions/1", None).await;
    assert_error(status, &body, 410, "resource gone");
    let (status, body) = send(&app, Method::DELETE, "/api/questions/abc", None).await;
    assert_error(status, &body, 404, "resource not found");
}

#[tokio::test]
async fn quiz_draws_the_last_unseen_question() {
    let app = app().await;
    let request = json!({
        "quiz_category": {"type": "Science", "id": 1},
        "previous_questions": [10, 11]
    });
    for _ in 0..10 {
        let (status, body) = post(&app, "/api/quizzes", request.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["question"]["id"], json!(12));
        assert_eq!(body["question"]["category"], json!(1));
    }
}

#[tokio::test]
async fn exhausted_quiz_returns_null() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/quizzes",
        json!({
            "quiz_category": {"type": "Science", "id": "1"},
            "previous_questions": [10, 11, 12]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "question": null}));
}

#[tokio::test]
async fn quiz_over_all_categories_skips_previous() {
    let app = app().await;
    let previous: Vec<i64> = (20..35).chain([10, 12]).collect();
    let (status, body) = post(
        &app,
        "/api/quizzes",
        json!({"quiz_category": {"type": "click", "id": 0}, "previous_questions": previous}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], json!(11));
}

#[tokio::test]
async fn quiz_for_unknown_category_is_not_found() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/quizzes",
        json!({"quiz_category": {"id": 99}, "previous_questions": []}),
    )
    .await;
    assert_error(status, &body, 404, "resource not found");
}

#[tokio::test]
async fn serves_metrics() {
    let app = app().await;
    post(&app, "/api/quizzes", json!({"previous_questions": []})).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("quiz_draws_total"));
}
