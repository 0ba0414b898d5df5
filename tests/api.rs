use std::sync::Arc;

use q_and_a_forum::build_routes;
use q_and_a_forum::store::{MemoryStore, Store};
use q_and_a_forum::types::{answer::AnswerId, question::QuestionId, vote::Vote};
use serde_json::{json, Value};
use warp::http::StatusCode;
use warp::test::request;

struct Response {
    status: StatusCode,
    body: Value,
}

async fn send(store: &MemoryStore, method: &str, path: &str, body: Option<Value>) -> Response {
    let api = build_routes(Arc::new(store.clone()));
    let mut req = request().method(method).path(path);
    if let Some(body) = body {
        req = req.json(&body);
    }
    let res = req.reply(&api).await;
    Response {
        status: res.status(),
        body: serde_json::from_slice(res.body()).unwrap_or(Value::Null),
    }
}

async fn create_question(store: &MemoryStore, title: &str, category: &str) -> i64 {
    let res = send(
        store,
        "POST",
        "/questions",
        Some(json!({"title": title, "description": "...", "category": category})),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["data"]["id"].as_i64().unwrap()
}

async fn create_answer(store: &MemoryStore, question_id: i64, content: &str) -> i64 {
    let res = send(
        store,
        "POST",
        &format!("/questions/{}/answers", question_id),
        Some(json!({ "content": content })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn question_and_answer_lifecycle() {
    let store = MemoryStore::new();

    let res = send(
        &store,
        "POST",
        "/questions",
        Some(json!({
            "title": "Capital of France",
            "description": "Which city is it?",
            "category": "miscellaneous"
        })),
    )
    .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let id = res.body["data"]["id"].as_i64().unwrap();

    let res = send(&store, "GET", &format!("/questions/{}", id), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"]["title"], "Capital of France");
    assert_eq!(res.body["data"]["description"], "Which city is it?");
    assert_eq!(res.body["data"]["category"], "miscellaneous");

    create_answer(&store, id, "Paris").await;

    let res = send(&store, "GET", &format!("/questions/{}/answers", id), None).await;
    assert_eq!(res.status, StatusCode::OK);
    let answers = res.body["data"].as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["content"], "Paris");

    let res = send(&store, "DELETE", &format!("/questions/{}", id), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["message"].is_string());

    let res = send(&store, "GET", &format!("/questions/{}", id), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Question not found.");

    let res = send(&store, "GET", &format!("/questions/{}/answers", id), None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_question() {
    let store = MemoryStore::new();
    let res = send(&store, "GET", "/questions", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"], json!([]));

    create_question(&store, "one", "music").await;
    create_question(&store, "two", "not-a-listed-category").await;

    let res = send(&store, "GET", "/questions", None).await;
    assert_eq!(res.body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_question_fields_are_rejected() {
    let store = MemoryStore::new();
    let res = send(
        &store,
        "POST",
        "/questions",
        Some(json!({"title": "t", "description": ""})),
    )
    .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "description is required.");

    let res = send(&store, "GET", "/questions", None).await;
    assert_eq!(res.body["data"], json!([]));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let store = MemoryStore::new();
    let api = build_routes(Arc::new(store));
    let res = request()
        .method("POST")
        .path("/questions")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&api)
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let store = MemoryStore::new();
    let id = create_question(&store, "old", "history").await;

    let res = send(
        &store,
        "PUT",
        &format!("/questions/{}", id),
        Some(json!({"title": "new", "description": "fresh", "category": "movies"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = send(&store, "GET", &format!("/questions/{}", id), None).await;
    assert_eq!(
        res.body["data"],
        json!({"id": id, "title": "new", "description": "fresh", "category": "movies"})
    );
}

#[tokio::test]
async fn absent_question_ids_are_not_found() {
    let store = MemoryStore::new();
    let body = json!({"title": "t", "description": "d", "category": "music"});

    for (method, path, body) in [
        ("GET", "/questions/42", None),
        ("PUT", "/questions/42", Some(body)),
        ("DELETE", "/questions/42", None),
        ("POST", "/questions/42/vote", Some(json!({"vote": 1}))),
        ("POST", "/question/42/vote", Some(json!({"vote": -1}))),
        ("GET", "/questions/42/answers", None),
        ("POST", "/questions/42/answers", Some(json!({"content": "x"}))),
        ("DELETE", "/questions/42/answers", None),
    ] {
        let res = send(&store, method, path, body).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{} {}", method, path);
        assert_eq!(res.body["message"], "Question not found.");
    }
}

#[tokio::test]
async fn search_filters_by_title_and_category() {
    let store = MemoryStore::new();
    create_question(&store, "Best guitar solo", "music").await;
    create_question(&store, "Best film score", "movies").await;
    create_question(&store, "Jazz standards", "music").await;

    let res = send(&store, "GET", "/questions/search?category=music", None).await;
    assert_eq!(res.status, StatusCode::OK);
    let found = res.body["data"].as_array().unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|q| q["category"] == "music"));

    let res = send(
        &store,
        "GET",
        "/questions/search?title=BEST&category=music",
        None,
    )
    .await;
    let found = res.body["data"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["title"], "Best guitar solo");

    let res = send(&store, "GET", "/questions/search", None).await;
    assert_eq!(res.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn search_without_matches_is_empty() {
    let store = MemoryStore::new();
    create_question(&store, "Jazz standards", "music").await;

    let res = send(&store, "GET", "/questions/search?title=opera", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"], json!([]));
}

#[tokio::test]
async fn search_rejects_unknown_category() {
    let store = MemoryStore::unavailable();
    let res = send(&store, "GET", "/questions/search?category=unknown-cat", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "Invalid category.");
}

#[tokio::test]
async fn answers_of_an_unanswered_question_are_empty() {
    let store = MemoryStore::new();
    let id = create_question(&store, "Quiet one", "history").await;

    let res = send(&store, "GET", &format!("/questions/{}/answers", id), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["data"], json!([]));
}

#[tokio::test]
async fn answer_content_is_validated() {
    let store = MemoryStore::new();
    let id = create_question(&store, "q", "sports").await;
    let path = format!("/questions/{}/answers", id);

    let res = send(&store, "POST", &path, Some(json!({}))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["message"], "content is required.");

    let res = send(&store, "POST", &path, Some(json!({ "content": "a".repeat(301) }))).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = send(&store, "POST", &path, Some(json!({ "content": "a".repeat(300) }))).await;
    assert_eq!(res.status, StatusCode::CREATED);
}

#[tokio::test]
async fn deleting_answers_requires_some_to_exist() {
    let store = MemoryStore::new();
    let id = create_question(&store, "q", "technology").await;
    let path = format!("/questions/{}/answers", id);

    let res = send(&store, "DELETE", &path, None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "There is no answer for this question.");

    let answer = create_answer(&store, id, "one").await;
    create_answer(&store, id, "two").await;
    send(&store, "POST", &format!("/answers/{}/vote", answer), Some(json!({"vote": 1}))).await;

    let res = send(&store, "DELETE", &path, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(store.answer_votes(AnswerId(answer as i32)).await.is_empty());

    let res = send(&store, "GET", &path, None).await;
    assert_eq!(res.body["data"], json!([]));

    let res = send(&store, "GET", &format!("/questions/{}", id), None).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[tokio::test]
async fn votes_append_on_both_route_spellings() {
    let store = MemoryStore::new();
    let question = create_question(&store, "q", "cuisine").await;
    let answer = create_answer(&store, question, "a").await;

    for path in [
        format!("/answers/{}/vote", answer),
        format!("/answer/{}/vote", answer),
    ] {
        let res = send(&store, "POST", &path, Some(json!({"vote": 1}))).await;
        assert_eq!(res.status, StatusCode::CREATED);
    }
    send(&store, "POST", &format!("/answers/{}/vote", answer), Some(json!({"vote": -1}))).await;
    assert_eq!(store.answer_votes(AnswerId(answer as i32)).await, vec![1, 1, -1]);

    for path in [
        format!("/questions/{}/vote", question),
        format!("/question/{}/vote", question),
    ] {
        let res = send(&store, "POST", &path, Some(json!({"vote": -1}))).await;
        assert_eq!(res.status, StatusCode::CREATED);
    }
    assert_eq!(
        store.question_votes(QuestionId(question as i32)).await,
        vec![-1, -1]
    );
}

#[tokio::test]
async fn invalid_votes_append_nothing() {
    let store = MemoryStore::new();
    let question = create_question(&store, "q", "cuisine").await;
    let answer = create_answer(&store, question, "a").await;

    for vote in [json!(0), json!(2), json!(1.5), json!("up")] {
        let res = send(
            &store,
            "POST",
            &format!("/answers/{}/vote", answer),
            Some(json!({ "vote": vote })),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["message"], "Invalid vote value.");

        let res = send(
            &store,
            "POST",
            &format!("/questions/{}/vote", question),
            Some(json!({ "vote": vote })),
        )
        .await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
    }
    assert!(store.answer_votes(AnswerId(answer as i32)).await.is_empty());
    assert!(store.question_votes(QuestionId(question as i32)).await.is_empty());
}

#[tokio::test]
async fn voting_on_missing_answer_is_not_found() {
    let store = MemoryStore::new();
    let res = send(&store, "POST", "/answers/7/vote", Some(json!({"vote": 1}))).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Answer not found.");
}

#[tokio::test]
async fn deleting_a_question_removes_its_votes() {
    let store = MemoryStore::new();
    let question = create_question(&store, "q", "travelling").await;
    let answer = create_answer(&store, question, "a").await;
    send(&store, "POST", &format!("/questions/{}/vote", question), Some(json!({"vote": 1}))).await;
    send(&store, "POST", &format!("/answers/{}/vote", answer), Some(json!({"vote": 1}))).await;

    let res = send(&store, "DELETE", &format!("/questions/{}", question), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(store.question_votes(QuestionId(question as i32)).await.is_empty());
    assert!(store.answer_votes(AnswerId(answer as i32)).await.is_empty());

    let res = send(&store, "POST", &format!("/answers/{}/vote", answer), Some(json!({"vote": 1}))).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_votes_all_persist() {
    let store = MemoryStore::new();
    let question = create_question(&store, "q", "sports").await;
    let answer = AnswerId(create_answer(&store, question, "a").await as i32);

    let mut handles = Vec::new();
    for i in 0..20 {
        let store = store.clone();
        let vote = if i % 2 == 0 { Vote::Up } else { Vote::Down };
        handles.push(tokio::spawn(async move {
            store.add_answer_vote(answer, vote).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    let votes = store.answer_votes(answer).await;
    assert_eq!(votes.len(), 20);
    assert_eq!(votes.iter().sum::<i32>(), 0);
}

#[tokio::test]
async fn store_faults_are_generic_server_errors() {
    let store = MemoryStore::unavailable();

    let res = send(&store, "GET", "/questions", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["message"], "Unable to fetch questions.");

    let res = send(
        &store,
        "POST",
        "/questions",
        Some(json!({"title": "t", "description": "d", "category": "music"})),
    )
    .await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["message"], "Unable to create question.");

    let res = send(&store, "DELETE", "/questions/1", None).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["message"], "Unable to delete question.");
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let store = MemoryStore::new();
    let res = send(&store, "GET", "/nowhere", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "Route not found");

    let res = send(&store, "GET", "/test", None).await;
    assert_eq!(res.status, StatusCode::OK);
}
