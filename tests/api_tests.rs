// tests/api_tests.rs

use std::sync::Arc;

use sat_prep_backend::{config::Config, routes, state::AppState, store::MemoryStore};
use serde_json::{Value, json};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        seed_file: None,
        warnings: Vec::new(),
    };

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config,
    };

    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

/// Two passages, three questions. Correct choices: 1 -> "a", 2 -> 5, q3 -> "y".
fn reading_test() -> Value {
    json!({
        "title": "Reading Practice 1",
        "kind": "test",
        "timeLimitMinutes": 30,
        "passages": [
            {
                "title": "Passage 1",
                "content": "<p>The passage text.</p>",
                "questions": [
                    { "id": 1, "prompt": "Main idea?", "choices": [
                        { "id": "a", "text": "A", "isCorrect": true },
                        { "id": "b", "text": "B", "isCorrect": false }
                    ]},
                    { "id": 2, "prompt": "Line 4 means", "choices": [
                        { "id": 5, "text": "C", "isCorrect": true },
                        { "id": 6, "text": "D", "isCorrect": false }
                    ]}
                ]
            },
            {
                "content": "<p>Second passage.</p>",
                "questions": [
                    { "id": "q3", "prompt": "Tone?", "choices": [
                        { "id": "x", "text": "Ironic", "isCorrect": false },
                        { "id": "y", "text": "Earnest", "isCorrect": true }
                    ]}
                ]
            }
        ]
    })
}

async fn create_assessment(client: &reqwest::Client, address: &str, body: &Value) -> i64 {
    let response = client
        .post(format!("{}/api/admin/assessments", address))
        .json(body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 201);
    let created: Value = response.json().await.unwrap();
    created["id"].as_i64().expect("id missing")
}

#[tokio::test]
async fn health_check_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn create_rejects_missing_correct_choice() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let mut body = reading_test();
    body["passages"][0]["questions"][0]["choices"][0]["isCorrect"] = json!(false);

    let response = client
        .post(format!("{}/api/admin/assessments", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn public_view_hides_answer_key() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_assessment(&client, &address, &reading_test()).await;

    let body = client
        .get(format!("{}/api/assessments/{}", address, id))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(!body.contains("isCorrect"));
    let view: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(view["passages"][0]["questions"][1]["choices"][0]["id"], "5");

    let admin_view: Value = client
        .get(format!("{}/api/admin/assessments/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin_view["passages"][0]["questions"][0]["choices"][0]["isCorrect"], true);

    let list: Vec<Value> = client
        .get(format!("{}/api/assessments", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["questionCount"], 3);
}

#[tokio::test]
async fn unknown_assessment_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/assessments/999/submissions", address))
        .json(&json!({ "studentId": "s1", "answers": [] }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn completeness_then_submission_flow() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_assessment(&client, &address, &reading_test()).await;

    // 1. Partial answers: q3 missing, unknown question 99 still counted as answered
    let partial = json!([
        { "questionId": "1", "choiceId": "a" },
        { "questionId": 2, "choiceId": null },
        { "questionId": 99, "choiceId": "a" }
    ]);

    let report: Value = client
        .post(format!("{}/api/assessments/{}/completeness", address, id))
        .json(&json!({ "answers": partial }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(report["isValid"], false);
    assert_eq!(report["missingQuestions"], json!(["q3"]));
    assert_eq!(report["totalQuestions"], 3);
    assert_eq!(report["answeredQuestions"], 3);

    // 2. Manual submit of the partial answers is refused
    let response = client
        .post(format!("{}/api/assessments/{}/submissions", address, id))
        .json(&json!({ "studentId": "student-1", "answers": partial }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["missingQuestions"], json!(["q3"]));

    // 3. Auto-submit grades the partial answers anyway
    let response = client
        .post(format!("{}/api/assessments/{}/submissions", address, id))
        .json(&json!({ "studentId": "student-1", "answers": partial, "autoSubmit": true }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
    let submission: Value = response.json().await.unwrap();
    assert_eq!(submission["score"], 1);
    assert_eq!(submission["totalQuestions"], 3);
    assert_eq!(submission["autoSubmitted"], true);

    let answers = submission["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 3);
    assert_eq!(answers[0]["questionId"], "1");
    assert_eq!(answers[0]["isCorrect"], true);
    assert_eq!(answers[1]["choiceId"], Value::Null);
    assert_eq!(answers[1]["isCorrect"], false);
    assert_eq!(answers[2]["questionId"], "q3");
    assert_eq!(answers[2]["choiceId"], Value::Null);

    // 4. Stored submission can be fetched back
    let submission_id = submission["id"].as_str().unwrap();
    let fetched: Value = client
        .get(format!("{}/api/submissions/{}", address, submission_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched["score"], 1);
}

#[tokio::test]
async fn full_marks_with_mixed_id_types() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_assessment(&client, &address, &reading_test()).await;

    let response = client
        .post(format!("{}/api/assessments/{}/submissions", address, id))
        .json(&json!({
            "studentId": "student-2",
            "answers": [
                { "questionId": 1, "choiceId": "a" },
                { "questionId": "2", "choiceId": 5 },
                { "questionId": "q3", "choiceId": "y" }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
    let submission: Value = response.json().await.unwrap();
    assert_eq!(submission["score"], 3);
    assert_eq!(submission["percentage"], 100.0);

    let history: Vec<Value> = client
        .get(format!("{}/api/students/student-2/submissions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["assessmentId"], id);
}

#[tokio::test]
async fn submission_requires_student_id() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_assessment(&client, &address, &reading_test()).await;

    let response = client
        .post(format!("{}/api/assessments/{}/submissions", address, id))
        .json(&json!({ "studentId": "", "answers": [], "autoSubmit": true }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn delete_assessment_works() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_assessment(&client, &address, &reading_test()).await;

    let response = client
        .delete(format!("{}/api/admin/assessments/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client
        .get(format!("{}/api/assessments/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
