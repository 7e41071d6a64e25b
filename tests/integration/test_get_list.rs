use crate::common::*;
use actix_web::http::StatusCode;
use taskboard::store::TaskStore;

async fn seed(harness: &TaskHarness) {
    for (title, user_id) in [("a", 1), ("b", 2), ("c", 1), ("d", 3)] {
        harness
            .store
            .insert_task(new_task(title, user_id))
            .await
            .unwrap();
    }
}

#[actix_web::test]
async fn test_list_empty() {
    let harness = task_harness(true);
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::get().uri("/tasks").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!([]));
}

#[actix_web::test]
async fn test_list_all_in_creation_order() {
    let harness = task_harness(true);
    seed(&harness).await;
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::get().uri("/tasks").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    let body: Vec<serde_json::Value> = actix_web::test::read_body_json(resp).await;

    let titles: Vec<&str> = body.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["a", "b", "c", "d"]);
}

#[actix_web::test]
async fn test_list_filtered_by_user() {
    let harness = task_harness(true);
    seed(&harness).await;
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::get()
        .uri("/tasks?user_id=1")
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<serde_json::Value> = actix_web::test::read_body_json(resp).await;
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(|t| t["userId"] == 1));

    let req = actix_web::test::TestRequest::get()
        .uri("/tasks?user_id=77")
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    let body: Vec<serde_json::Value> = actix_web::test::read_body_json(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_list_empty_filter_means_all() {
    let harness = task_harness(true);
    seed(&harness).await;
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::get()
        .uri("/tasks?user_id=")
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    let body: Vec<serde_json::Value> = actix_web::test::read_body_json(resp).await;
    assert_eq!(body.len(), 4);
}

#[actix_web::test]
async fn test_list_invalid_filter() {
    let harness = task_harness(true);
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::get()
        .uri("/tasks?user_id=abc")
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::BAD_REQUEST, "invalid user_id").await;
}

#[actix_web::test]
async fn test_list_undecodable_filter() {
    let harness = task_harness(true);
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::get()
        .uri("/tasks?user_id=1&user_id=2")
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::BAD_REQUEST, "invalid user_id").await;
}

#[actix_web::test]
async fn test_get_task() {
    let harness = task_harness(true);
    seed(&harness).await;
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::get().uri("/tasks/3").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
    assert_eq!(body["id"], 3);
    assert_eq!(body["title"], "c");
    assert_eq!(body["userId"], 1);
}

#[actix_web::test]
async fn test_get_missing_task() {
    let harness = task_harness(true);
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::get().uri("/tasks/999").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::NOT_FOUND, "task not found").await;
}

#[actix_web::test]
async fn test_get_invalid_id() {
    let harness = task_harness(true);
    let app = task_service!(harness.state);

    for uri in ["/tasks/abc", "/tasks/12abc", "/tasks/1.5"] {
        let req = actix_web::test::TestRequest::get().uri(uri).to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_error(resp, StatusCode::BAD_REQUEST, "invalid id").await;
    }
}
