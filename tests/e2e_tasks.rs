//! End-to-End Test Suite: live API server driven through the HTTP client
//!
//! Each test binds a server on an ephemeral port with the in-memory store and
//! exercises it with `HttpTaskApi`, `TaskBoard` and raw `reqwest` calls.

use std::{collections::HashSet, sync::Arc};

use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::oneshot};

use taskboard_api::ApiServer;
use taskboard_client::{HttpTaskApi, TaskApi, TaskBoard};
use taskboard_config::AppConfig;
use taskboard_domain::{Priority, TaskFilter, TaskId, TaskInput};

/// Running server; dropping it shuts the server down
struct TestServer {
    api_url: String,
    root_url: String,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = listener.local_addr().expect("Failed to read local address");

        let server = ApiServer::from_config(&AppConfig::default())
            .await
            .expect("Failed to build server");
        let (shutdown, signal) = oneshot::channel::<()>();
        tokio::spawn(server.serve(listener, async {
            let _ = signal.await;
        }));

        Self {
            api_url: format!("http://{}/api", address),
            root_url: format!("http://{}", address),
            _shutdown: shutdown,
        }
    }

    fn client(&self) -> HttpTaskApi {
        HttpTaskApi::with_base_url(&self.api_url).expect("Failed to build client")
    }

    async fn get(&self, path: &str) -> (u16, Value) {
        let response = reqwest::get(format!("{}{}", self.api_url, path))
            .await
            .expect("request failed");
        let status = response.status().as_u16();
        (status, response.json().await.expect("body was not JSON"))
    }

    async fn post(&self, path: &str, body: Value) -> (u16, Value) {
        let response = reqwest::Client::new()
            .post(format!("{}{}", self.api_url, path))
            .json(&body)
            .send()
            .await
            .expect("request failed");
        let status = response.status().as_u16();
        (status, response.json().await.expect("body was not JSON"))
    }
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data was not a list")
        .iter()
        .map(|task| task["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Buy milk: create, toggle, then check the active and completed views
#[tokio::test]
async fn test_buy_milk_workflow() {
    let server = TestServer::start().await;
    let mut board = TaskBoard::new(Arc::new(server.client()));
    board.mount().await.unwrap();
    assert!(board.tasks().is_empty());

    board.draft_mut().title = Some("Buy milk".to_string());
    let milk = board.submit_draft().await.unwrap().unwrap();
    assert_eq!(milk.priority, Priority::Medium);
    assert!(!milk.completed);
    assert_eq!(milk.created_at, milk.updated_at);

    let toggled = board.toggle(&milk.id).await.unwrap();
    assert!(toggled.completed);

    board.set_filter(TaskFilter::Active).await.unwrap();
    assert!(board.tasks().iter().all(|t| t.id != milk.id));

    board.set_filter(TaskFilter::Completed).await.unwrap();
    assert_eq!(board.tasks().len(), 1);
    assert_eq!(board.tasks()[0].id, milk.id);
}

/// A, B, C created in sequence come back as C, B, A with or without `filter=all`
#[tokio::test]
async fn test_listing_is_newest_first() {
    let server = TestServer::start().await;
    let api = server.client();
    let a = api.create_task(&TaskInput::titled("A")).await.unwrap();
    let b = api.create_task(&TaskInput::titled("B")).await.unwrap();
    let c = api.create_task(&TaskInput::titled("C")).await.unwrap();
    let expected: Vec<String> = [c.id, b.id, a.id].iter().map(TaskId::to_string).collect();

    let (status, all) = server.get("/tasks?filter=all").await;
    assert_eq!(status, 200);
    assert_eq!(all["count"], 3);
    assert_eq!(ids(&all), expected);

    let (_, unfiltered) = server.get("/tasks").await;
    assert_eq!(ids(&unfiltered), expected);
}

#[tokio::test]
async fn test_filters_partition_the_list() {
    let server = TestServer::start().await;
    let api = server.client();
    for i in 0..6 {
        let task = api
            .create_task(&TaskInput::titled(format!("Task {}", i)))
            .await
            .unwrap();
        if i % 3 == 0 {
            api.toggle_task(&task.id).await.unwrap();
        }
    }

    let all: HashSet<TaskId> = api
        .list_tasks(TaskFilter::All)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    let active = api.list_tasks(TaskFilter::Active).await.unwrap();
    let completed = api.list_tasks(TaskFilter::Completed).await.unwrap();

    assert!(active.iter().all(|t| !t.completed));
    assert!(completed.iter().all(|t| t.completed));
    assert_eq!(completed.len(), 2);

    let active_ids: HashSet<TaskId> = active.iter().map(|t| t.id).collect();
    let completed_ids: HashSet<TaskId> = completed.iter().map(|t| t.id).collect();
    assert!(active_ids.is_disjoint(&completed_ids));
    assert_eq!(&active_ids | &completed_ids, all);
}

#[tokio::test]
async fn test_double_toggle_restores_flag() {
    let server = TestServer::start().await;
    let api = server.client();
    let task = api.create_task(&TaskInput::titled("Flip me")).await.unwrap();

    let once = api.toggle_task(&task.id).await.unwrap();
    let twice = api.toggle_task(&task.id).await.unwrap();

    assert!(once.completed);
    assert_eq!(twice.completed, task.completed);
    assert!(task.updated_at < once.updated_at);
    assert!(once.updated_at < twice.updated_at);
}

#[tokio::test]
async fn test_delete_then_fetch_and_delete_again() {
    let server = TestServer::start().await;
    let api = server.client();
    let task = api.create_task(&TaskInput::titled("Short lived")).await.unwrap();

    api.delete_task(&task.id).await.unwrap();
    assert!(api.get_task(&task.id).await.unwrap_err().is_not_found());
    assert!(api.delete_task(&task.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_title_validation_over_the_wire() {
    let server = TestServer::start().await;

    let (status, body) = server.post("/tasks", json!({"title": "é".repeat(200)})).await;
    assert_eq!(status, 201);
    assert_eq!(body["data"]["title"].as_str().unwrap().chars().count(), 200);

    for body in [json!({"title": "x".repeat(201)}), json!({"title": ""}), json!({})] {
        let (status, response) = server.post("/tasks", body).await;
        assert_eq!(status, 400);
        assert_eq!(response["success"], false);
        assert_eq!(response["message"], "Validation error");
    }

    let (_, list) = server.get("/tasks").await;
    assert_eq!(list["count"], 1);
}

#[tokio::test]
async fn test_edit_round_trip_through_board() {
    let server = TestServer::start().await;
    let mut board = TaskBoard::new(Arc::new(server.client()));

    *board.draft_mut() = TaskInput {
        description: Some(Some("first draft".to_string())),
        due_date: Some(Some("2030-01-02".to_string())),
        ..TaskInput::titled("Write report")
    };
    let task = board.submit_draft().await.unwrap().unwrap();
    assert_eq!(task.description.as_deref(), Some("first draft"));

    assert!(board.begin_edit(&task.id));
    {
        let edit = board.edit_mut().unwrap();
        edit.priority = Some("high".to_string());
        edit.description = Some(None);
    }
    let saved = board.save_edit().await.unwrap().unwrap();

    assert_eq!(saved.priority, Priority::High);
    assert!(saved.description.is_none());
    assert_eq!(saved.due_date, task.due_date);
    assert_eq!(saved.created_at, task.created_at);
    assert_eq!(board.tasks()[0], saved);
}

#[tokio::test]
async fn test_liveness_endpoints() {
    let server = TestServer::start().await;

    let root: Value = reqwest::get(&server.root_url)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(root["message"], "Task Management API is running");

    let health: Value = reqwest::get(format!("{}/health", server.root_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["storage"], "memory");
}
