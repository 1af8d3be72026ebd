use axum::http::StatusCode;
use db::models::user::Role;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

use crate::helpers::app::{make_test_app, request, response_json, seed_user, user_id_for};

#[tokio::test]
#[serial]
async fn registration_is_idempotent_over_http() {
    let (app, _db) = make_test_app().await;

    let body = json!({ "email": "Alice@Example.com", "name": "Alice" });
    let first = app
        .clone()
        .oneshot(request("POST", "/api/users", None, Some(body.clone())))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_json = response_json(first).await;
    assert_eq!(first_json["success"], true);
    assert_eq!(first_json["data"]["email"], "alice@example.com");
    assert_eq!(first_json["data"]["role"], "student");
    assert_eq!(first_json["data"]["already_exists"], false);

    let second = app
        .clone()
        .oneshot(request("POST", "/api/users", None, Some(body)))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let second_json = response_json(second).await;
    assert_eq!(second_json["data"]["already_exists"], true);
    assert_eq!(second_json["data"]["id"], first_json["data"]["id"]);
}

#[tokio::test]
#[serial]
async fn registration_rejects_invalid_email() {
    let (app, _db) = make_test_app().await;

    let response = app
        .oneshot(request(
            "POST",
            "/api/users",
            None,
            Some(json!({ "email": "not-an-email" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[serial]
async fn listing_users_is_admin_only() {
    let (app, db) = make_test_app().await;
    let student_token = seed_user(&db, "student@test.com", Role::Student).await;
    let admin_token = seed_user(&db, "admin@test.com", Role::Admin).await;

    let anonymous = app
        .clone()
        .oneshot(request("GET", "/api/users", None, None))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let student = app
        .clone()
        .oneshot(request("GET", "/api/users", Some(&student_token), None))
        .await
        .unwrap();
    assert_eq!(student.status(), StatusCode::FORBIDDEN);

    let admin = app
        .oneshot(request("GET", "/api/users", Some(&admin_token), None))
        .await
        .unwrap();
    assert_eq!(admin.status(), StatusCode::OK);
    let body = response_json(admin).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[serial]
async fn role_lookup_is_self_or_admin() {
    let (app, db) = make_test_app().await;
    let student_token = seed_user(&db, "student@test.com", Role::Student).await;
    let admin_token = seed_user(&db, "admin@test.com", Role::Admin).await;

    let own = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/users/student@test.com/role",
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::OK);
    assert_eq!(response_json(own).await["data"]["role"], "student");

    let other = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/users/admin@test.com/role",
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::FORBIDDEN);

    // Admins may ask about anyone, including emails with no stored row.
    let unknown = app
        .oneshot(request(
            "GET",
            "/api/users/ghost@test.com/role",
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::OK);
    assert_eq!(response_json(unknown).await["data"]["role"], "user");
}

#[tokio::test]
#[serial]
async fn make_admin_and_delete_are_admin_only() {
    let (app, db) = make_test_app().await;
    let student_token = seed_user(&db, "student@test.com", Role::Student).await;
    let admin_token = seed_user(&db, "admin@test.com", Role::Admin).await;
    let student_id = user_id_for(&db, "student@test.com").await;

    let forbidden = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/users/make-admin/{student_id}"),
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let promoted = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/users/make-admin/{student_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(promoted.status(), StatusCode::OK);
    assert_eq!(response_json(promoted).await["data"]["role"], "admin");

    let deleted = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/api/users/{student_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = app
        .oneshot(request(
            "DELETE",
            &format!("/api/users/{student_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
