mod common;

use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{call_json, register_and_login, test_app, test_state};

#[actix_rt::test]
async fn test_user_reads() {
    let app = test::init_service(test_app(test_state())).await;
    let first = register_and_login(&app, "first@example.com").await;
    let second = register_and_login(&app, "second@example.com").await;

    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .append_header(first.bearer())
        .to_request();
    let (status, me) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        me,
        json!({
            "id": first.id,
            "firstName": "J",
            "lastName": "X",
            "email": "first@example.com",
            "isActive": true
        })
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", second.id))
        .append_header(first.bearer())
        .to_request();
    let (status, other) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(other["email"], "second@example.com");

    let req = test::TestRequest::get()
        .uri("/api/users")
        .append_header(second.bearer())
        .to_request();
    let (status, all) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let emails: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["first@example.com", "second@example.com"]);
    assert!(all.as_array().unwrap().iter().all(|u| u.get("password").is_none()));

    let req = test::TestRequest::get()
        .uri("/api/users/9999")
        .append_header(first.bearer())
        .to_request();
    let (status, body) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User with ID 9999 not found");
}

#[actix_rt::test]
async fn test_update_user_names() {
    let app = test::init_service(test_app(test_state())).await;
    let user = register_and_login(&app, "rename@example.com").await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", user.id))
        .append_header(user.bearer())
        .set_json(json!({ "firstName": "Jane", "lastName": "Doe" }))
        .to_request();
    let (status, updated) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "Jane");
    assert_eq!(updated["lastName"], "Doe");
    assert_eq!(updated["email"], "rename@example.com");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", user.id))
        .append_header(user.bearer())
        .set_json(json!({ "lastName": "Roe" }))
        .to_request();
    let (status, updated) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["firstName"], "Jane");
    assert_eq!(updated["lastName"], "Roe");

    // email and password are not updatable through this path
    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", user.id))
        .append_header(user.bearer())
        .set_json(json!({ "email": "stolen@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", user.id))
        .append_header(user.bearer())
        .set_json(json!({ "firstName": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::patch()
        .uri("/api/users/9999")
        .append_header(user.bearer())
        .set_json(json!({ "firstName": "Ghost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_delete_user_revokes_access_and_removes_tasks() {
    let app = test::init_service(test_app(test_state())).await;
    let doomed = register_and_login(&app, "doomed@example.com").await;
    let survivor = register_and_login(&app, "survivor@example.com").await;

    let req = test::TestRequest::post()
        .uri("/api/tasks")
        .append_header(doomed.bearer())
        .set_json(json!({ "title": "Orphan?", "description": "no" }))
        .to_request();
    let (status, task) = call_json(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);

    // any authenticated user may delete any other user
    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", doomed.id))
        .append_header(survivor.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .append_header(doomed.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tasks/{}", task["id"]))
        .append_header(survivor.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", doomed.id))
        .append_header(survivor.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
