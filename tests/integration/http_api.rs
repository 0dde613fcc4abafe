//! End-to-end tests of the HTTP API over a real socket.
//!
//! Each test starts its own server with a freshly seeded store on an
//! OS-assigned port.

mod common;

use std::net::SocketAddr;

use chrono::{Days, Utc};
use serde_json::json;
use taskdeck_server::server::{self, AppState};
use taskdeck_server::store::Store;

use common::{delete, get, patch, post, send};

async fn start() -> SocketAddr {
    let (addr, _handle) = server::start_server("127.0.0.1:0")
        .await
        .expect("failed to start test server");
    addr
}

fn ids(value: &serde_json::Value) -> Vec<u64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_check() {
    let addr = start().await;
    let resp = get(addr, "/health").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn seeded_projects_are_listed_in_order() {
    let addr = start().await;
    let resp = get(addr, "/api/projects").await;
    assert_eq!(resp.status, 200);
    let projects = resp.json();
    assert_eq!(
        projects,
        json!([
            {"id": 1, "name": "Website Redesign", "color": "#3B82F6"},
            {"id": 2, "name": "Mobile App", "color": "#10B981"},
            {"id": 3, "name": "Marketing Campaign", "color": "#8B5CF6"},
        ])
    );
}

#[tokio::test]
async fn full_task_lifecycle() {
    let addr = start().await;

    let resp = post(addr, "/api/projects", &json!({"name": "Test", "color": "#FFFFFF"})).await;
    assert_eq!(resp.status, 201);
    assert_eq!(resp.json()["id"], 4);

    let resp = post(addr, "/api/tasks", &json!({"title": "Write spec"})).await;
    assert_eq!(resp.status, 201);
    let task = resp.json();
    assert_eq!(task["id"], 1);
    assert_eq!(task["order"], 1);
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["status"], "active");
    assert_eq!(task["completed"], false);
    assert_eq!(task["description"], "");
    assert!(task["projectId"].is_null());
    assert!(task["dueDate"].is_null());

    let resp = patch(addr, "/api/tasks/1", &json!({"completed": true})).await;
    assert_eq!(resp.status, 200);
    let updated = resp.json();
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["title"], "Write spec");
    assert_eq!(updated["createdAt"], task["createdAt"]);

    let resp = delete(addr, "/api/tasks/1").await;
    assert_eq!(resp.status, 204);

    let resp = get(addr, "/api/tasks/1").await;
    assert_eq!(resp.status, 404);
    assert_eq!(resp.json()["error"], "not_found");

    let resp = delete(addr, "/api/tasks/1").await;
    assert_eq!(resp.status, 404);
}

#[tokio::test]
async fn get_task_includes_resolved_project() {
    let addr = start().await;
    post(addr, "/api/tasks", &json!({"title": "Hero", "projectId": 2})).await;
    post(addr, "/api/tasks", &json!({"title": "Orphan", "projectId": 77})).await;

    let filed = get(addr, "/api/tasks/1").await.json();
    assert_eq!(filed["project"]["name"], "Mobile App");

    let orphan = get(addr, "/api/tasks/2").await.json();
    assert_eq!(orphan["projectId"], 77);
    assert!(orphan.get("project").is_none());
}

#[tokio::test]
async fn patch_ignores_id_and_created_at() {
    let addr = start().await;
    let created = post(addr, "/api/tasks", &json!({"title": "Stable"})).await.json();

    let resp = patch(
        addr,
        "/api/tasks/1",
        &json!({"id": 50, "createdAt": "2000-01-01T00:00:00Z", "title": "Renamed"}),
    )
    .await;
    assert_eq!(resp.status, 200);
    let updated = resp.json();
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["title"], "Renamed");
    assert_eq!(get(addr, "/api/tasks/50").await.status, 404);
}

#[tokio::test]
async fn patch_null_clears_project_and_due_date() {
    let addr = start().await;
    post(
        addr,
        "/api/tasks",
        &json!({"title": "Dated", "projectId": 1, "dueDate": "2025-03-14"}),
    )
    .await;

    let kept = patch(addr, "/api/tasks/1", &json!({"priority": "low"})).await.json();
    assert_eq!(kept["projectId"], 1);
    assert_eq!(kept["dueDate"], "2025-03-14");

    let cleared = patch(addr, "/api/tasks/1", &json!({"projectId": null, "dueDate": null}))
        .await
        .json();
    assert!(cleared["projectId"].is_null());
    assert!(cleared["dueDate"].is_null());
}

#[tokio::test]
async fn patch_unknown_task_is_not_found() {
    let addr = start().await;
    let resp = patch(addr, "/api/tasks/9", &json!({"completed": true})).await;
    assert_eq!(resp.status, 404);
}

#[tokio::test]
async fn reorder_moves_listed_tasks_to_front() {
    let addr = start().await;
    for title in ["a", "b", "c", "d"] {
        post(addr, "/api/tasks", &json!({"title": title})).await;
    }

    let resp = post(addr, "/api/tasks/reorder", &json!({"taskIds": [3, 1, 2, 999]})).await;
    assert_eq!(resp.status, 204);

    let listed = get(addr, "/api/tasks").await.json();
    // Task 4 keeps order 4; 3, 1, 2 become 0, 1, 2.
    assert_eq!(ids(&listed), vec![3, 1, 2, 4]);
    assert_eq!(listed[0]["order"], 0);
    assert_eq!(listed[3]["order"], 4);
}

#[tokio::test]
async fn list_filters_from_query_string() {
    let addr = start().await;
    post(
        addr,
        "/api/tasks",
        &json!({"title": "Landing page", "priority": "high", "projectId": 1}),
    )
    .await;
    post(addr, "/api/tasks", &json!({"title": "App store listing", "projectId": 2})).await;
    post(
        addr,
        "/api/tasks",
        &json!({"title": "Newsletter", "completed": true, "description": "Monthly landing recap"}),
    )
    .await;

    let important = get(addr, "/api/tasks?view=important").await.json();
    assert_eq!(ids(&important), vec![1]);

    let in_project = get(addr, "/api/tasks?projectId=2").await.json();
    assert_eq!(ids(&in_project), vec![2]);

    let search = get(addr, "/api/tasks?search=LANDING").await.json();
    assert_eq!(ids(&search), vec![1, 3]);

    let open = get(addr, "/api/tasks?completion=active&search=landing").await.json();
    assert_eq!(ids(&open), vec![1]);

    let resp = get(addr, "/api/tasks?view=someday").await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.json()["error"], "bad_request");
}

#[tokio::test]
async fn board_groups_by_status() {
    let addr = start().await;
    post(addr, "/api/tasks", &json!({"title": "todo"})).await;
    post(addr, "/api/tasks", &json!({"title": "doing", "status": "in-progress"})).await;
    post(
        addr,
        "/api/tasks",
        &json!({"title": "done", "status": "completed", "completed": true}),
    )
    .await;
    post(addr, "/api/tasks", &json!({"title": "ticked", "completed": true})).await;
    post(addr, "/api/tasks", &json!({"title": "stale", "status": "completed"})).await;

    let board = get(addr, "/api/tasks/board").await.json();
    assert_eq!(ids(&board["active"]), vec![1]);
    assert_eq!(ids(&board["inProgress"]), vec![2]);
    assert_eq!(ids(&board["completed"]), vec![3, 4]);
}

#[tokio::test]
async fn default_order_stays_at_max_after_max_order() {
    let addr = start().await;
    let first = post(addr, "/api/tasks", &json!({"title": "a", "order": i64::MAX})).await;
    assert_eq!(first.status, 201);

    let next = post(addr, "/api/tasks", &json!({"title": "b"})).await;
    assert_eq!(next.status, 201);
    assert_eq!(next.json()["order"], i64::MAX);

    let listed = get(addr, "/api/tasks").await.json();
    assert_eq!(ids(&listed), vec![1, 2]);
}

#[tokio::test]
async fn stats_reflect_due_dates() {
    let addr = start().await;
    let today = Utc::now().date_naive();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap();

    post(addr, "/api/tasks", &json!({"title": "now", "dueDate": today.to_string()})).await;
    post(
        addr,
        "/api/tasks",
        &json!({"title": "late", "dueDate": yesterday.to_string(), "projectId": 3}),
    )
    .await;
    post(addr, "/api/tasks", &json!({"title": "done", "completed": true})).await;

    let stats = get(addr, "/api/stats").await.json();
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["completed"], 1);
    assert_eq!(stats["dueToday"], 1);
    assert_eq!(stats["overdue"], 1);
    assert_eq!(stats["byPriority"]["medium"], 3);
    let rate = stats["completionRate"].as_f64().unwrap();
    assert!((rate - 100.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn validation_errors_are_structured() {
    let addr = start().await;

    let resp = post(addr, "/api/tasks", &json!({"title": ""})).await;
    assert_eq!(resp.status, 400);
    let body = resp.json();
    assert_eq!(body["error"], "validation");
    assert_eq!(body["message"], "task title must not be empty");

    let resp = post(addr, "/api/projects", &json!({"name": "  "})).await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.json()["error"], "validation");

    let resp = patch(addr, "/api/tasks/1", &json!({"title": " "})).await;
    assert_eq!(resp.status, 400);
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let addr = start().await;

    let resp = post(addr, "/api/tasks", &json!({"title": "x", "priority": "urgent"})).await;
    assert_eq!(resp.status, 422);
    assert_eq!(resp.json()["error"], "bad_request");

    let resp = post(addr, "/api/tasks", &json!({"priority": "low"})).await;
    assert_eq!(resp.status, 422);

    let resp = send(addr, "POST", "/api/tasks", Some("{not json")).await;
    assert_eq!(resp.status, 400);

    let resp = get(addr, "/api/tasks/abc").await;
    assert_eq!(resp.status, 400);

    // Nothing was stored by any of the rejected requests.
    assert_eq!(get(addr, "/api/tasks").await.json(), json!([]));
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let state = AppState::new(Store::seeded());
    let (addr, _handle) = server::start_server_with_state("127.0.0.1:0", state, 256)
        .await
        .unwrap();

    let big = "x".repeat(1024);
    let resp = post(addr, "/api/tasks", &json!({"title": "big", "description": big})).await;
    assert_eq!(resp.status, 413);
}

#[tokio::test]
async fn unseeded_server_starts_without_projects() {
    let (addr, _handle) =
        server::start_server_with_state("127.0.0.1:0", AppState::new(Store::new()), 1024)
            .await
            .unwrap();
    assert_eq!(get(addr, "/api/projects").await.json(), json!([]));

    let created = post(addr, "/api/projects", &json!({"name": "First"})).await.json();
    assert_eq!(created["id"], 1);
    assert_eq!(created["color"], "#3B82F6");
}
