use crate::common::*;
use actix_web::http::StatusCode;

#[actix_web::test]
async fn test_storage_failure_is_opaque_500() {
    let app = task_service!(failing_task_state());

    let req = actix_web::test::TestRequest::get().uri("/tasks").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::INTERNAL_SERVER_ERROR, "internal server error").await;

    let req = actix_web::test::TestRequest::get().uri("/tasks/1").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::INTERNAL_SERVER_ERROR, "internal server error").await;
}

#[actix_web::test]
async fn test_create_storage_failure_after_user_check() {
    let app = task_service!(failing_task_state());

    let req = actix_web::test::TestRequest::post()
        .uri("/tasks")
        .set_json(task_json("t", 1))
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::INTERNAL_SERVER_ERROR, "internal server error").await;
}

#[actix_web::test]
async fn test_client_errors_win_over_storage_failure() {
    let app = task_service!(failing_task_state());

    let req = actix_web::test::TestRequest::put()
        .uri("/tasks/1")
        .set_json(status_json("done"))
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::BAD_REQUEST, "invalid status").await;
}

#[actix_web::test]
async fn test_user_service_storage_failure() {
    let app = user_service!(failing_user_state());

    let req = actix_web::test::TestRequest::get().uri("/users/1").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::INTERNAL_SERVER_ERROR, "internal server error").await;
}

#[actix_web::test]
async fn test_unknown_route_is_client_error() {
    let harness = task_harness(true);
    let app = task_service!(harness.state);

    let req = actix_web::test::TestRequest::delete()
        .uri("/tasks/1")
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
}
