use crate::common::*;
use actix_web::http::StatusCode;
use serde_json::json;
use taskboard::store::UserStore;

#[actix_web::test]
async fn test_create_user() {
    let (state, store) = user_state();
    let app = user_service!(state);

    let req = actix_web::test::TestRequest::post()
        .uri("/users")
        .set_json(user_json("Ada", "ada@example.com"))
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");

    assert_eq!(store.list_users().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_create_user_missing_fields() {
    let (state, store) = user_state();
    let app = user_service!(state);

    for body in [json!({"name": "Ada"}), json!({"email": "a@b.c"}), json!({"name": " ", "email": "a@b.c"})] {
        let req = actix_web::test::TestRequest::post()
            .uri("/users")
            .set_json(&body)
            .to_request();
        let resp = actix_web::test::call_service(&app, req).await;
        assert_error(resp, StatusCode::BAD_REQUEST, "name and email are required").await;
    }

    assert!(store.list_users().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_get_user() {
    let (state, store) = user_state();
    let user = store.insert_user(new_user("Grace")).await.unwrap();
    let app = user_service!(state);

    let req = actix_web::test::TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
    assert_eq!(body["name"], "Grace");
    assert_eq!(body["email"], "grace@example.com");
}

#[actix_web::test]
async fn test_get_missing_user() {
    let (state, _store) = user_state();
    let app = user_service!(state);

    let req = actix_web::test::TestRequest::get().uri("/users/42").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::NOT_FOUND, "user not found").await;

    let req = actix_web::test::TestRequest::get().uri("/users/x").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_error(resp, StatusCode::BAD_REQUEST, "invalid id").await;
}

#[actix_web::test]
async fn test_list_users() {
    let (state, store) = user_state();
    store.insert_user(new_user("Ada")).await.unwrap();
    store.insert_user(new_user("Grace")).await.unwrap();
    let app = user_service!(state);

    let req = actix_web::test::TestRequest::get().uri("/users").to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Vec<serde_json::Value> = actix_web::test::read_body_json(resp).await;
    let names: Vec<&str> = body.iter().map(|u| u["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Ada", "Grace"]);
}
