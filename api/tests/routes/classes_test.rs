use axum::http::StatusCode;
use db::models::user::Role;
use serde_json::json;
use serial_test::serial;
use tower::ServiceExt;

use crate::helpers::app::{make_test_app, request, response_json, seed_user};

fn painting_class() -> serde_json::Value {
    json!({
        "name": "Intro to Painting",
        "price": 49.0,
        "seats": 10,
        "category": "art",
        "description": "Brushes and color theory"
    })
}

#[tokio::test]
#[serial]
async fn creation_requires_the_teacher_role() {
    let (app, db) = make_test_app().await;
    let student_token = seed_user(&db, "student@test.com", Role::Student).await;
    let teacher_token = seed_user(&db, "teacher@test.com", Role::Teacher).await;

    let forbidden = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/classes",
            Some(&student_token),
            Some(painting_class()),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let created = app
        .oneshot(request(
            "POST",
            "/api/classes",
            Some(&teacher_token),
            Some(painting_class()),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let body = response_json(created).await;
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["teacher_email"], "teacher@test.com");
    assert_eq!(body["data"]["enrolled"], 0);
}

#[tokio::test]
#[serial]
async fn catalog_hides_unapproved_classes() {
    let (app, db) = make_test_app().await;
    let teacher_token = seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let admin_token = seed_user(&db, "admin@test.com", Role::Admin).await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/classes",
            Some(&teacher_token),
            Some(painting_class()),
        ))
        .await
        .unwrap();
    let class_id = response_json(created).await["data"]["id"].as_i64().unwrap();

    let public = app
        .clone()
        .oneshot(request("GET", "/api/classes", None, None))
        .await
        .unwrap();
    assert!(response_json(public).await["data"].as_array().unwrap().is_empty());

    // The owner sees it through ?mine=true, the admin through the full list.
    let mine = app
        .clone()
        .oneshot(request("GET", "/api/classes?mine=true", Some(&teacher_token), None))
        .await
        .unwrap();
    assert_eq!(response_json(mine).await["data"].as_array().unwrap().len(), 1);

    let all = app
        .clone()
        .oneshot(request("GET", "/api/classes", Some(&admin_token), None))
        .await
        .unwrap();
    assert_eq!(response_json(all).await["data"].as_array().unwrap().len(), 1);

    // Direct fetch is hidden from strangers until approval.
    let hidden = app
        .clone()
        .oneshot(request("GET", &format!("/api/classes/{class_id}"), None, None))
        .await
        .unwrap();
    assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

    let approved = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/classes/approve/{class_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(approved.status(), StatusCode::OK);

    let visible = app
        .oneshot(request("GET", &format!("/api/classes/{class_id}"), None, None))
        .await
        .unwrap();
    assert_eq!(visible.status(), StatusCode::OK);
    assert_eq!(response_json(visible).await["data"]["status"], "approved");
}

#[tokio::test]
#[serial]
async fn editing_resets_approval() {
    let (app, db) = make_test_app().await;
    let teacher_token = seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let admin_token = seed_user(&db, "admin@test.com", Role::Admin).await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/classes",
            Some(&teacher_token),
            Some(painting_class()),
        ))
        .await
        .unwrap();
    let class_id = response_json(created).await["data"]["id"].as_i64().unwrap();

    app.clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/classes/approve/{class_id}"),
            Some(&admin_token),
            None,
        ))
        .await
        .unwrap();

    // A non-owner teacher cannot edit.
    let other_token = seed_user(&db, "other@test.com", Role::Teacher).await;
    let forbidden = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/api/classes/{class_id}"),
            Some(&other_token),
            Some(json!({ "price": 1.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let edited = app
        .oneshot(request(
            "PATCH",
            &format!("/api/classes/{class_id}"),
            Some(&teacher_token),
            Some(json!({ "price": 59.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(edited.status(), StatusCode::OK);
    let body = response_json(edited).await;
    assert_eq!(body["data"]["price"], 59.0);
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
#[serial]
async fn approval_is_admin_only() {
    let (app, db) = make_test_app().await;
    let teacher_token = seed_user(&db, "teacher@test.com", Role::Teacher).await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/classes",
            Some(&teacher_token),
            Some(painting_class()),
        ))
        .await
        .unwrap();
    let class_id = response_json(created).await["data"]["id"].as_i64().unwrap();

    let forbidden = app
        .oneshot(request(
            "PATCH",
            &format!("/api/classes/approve/{class_id}"),
            Some(&teacher_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
}
