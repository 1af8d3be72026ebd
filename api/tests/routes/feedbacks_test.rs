use axum::http::StatusCode;
use db::models::user::Role;
use sea_orm::DatabaseConnection;
use serde_json::json;
use serial_test::serial;
use services::class_workflow::{ClassWorkflow, NewClass};
use services::enrollment::EnrollmentLedger;
use tower::ServiceExt;

use crate::helpers::app::{make_test_app, request, response_json, seed_user};

/// Approved class taught by `teacher@test.com`.
async fn approved_class(db: &DatabaseConnection) -> i64 {
    let classes = ClassWorkflow::new(db.clone());
    let class = classes
        .create(NewClass {
            teacher_email: "teacher@test.com".into(),
            name: "Sculpting".into(),
            image: None,
            price: 10.0,
            seats: 10,
            description: None,
            category: "art".into(),
        })
        .await
        .unwrap();
    classes.approve(class.id).await.unwrap();
    class.id
}

fn feedback_body(class_id: i64) -> serde_json::Value {
    json!({
        "class_id": class_id,
        "assignment_title": "Clay bowl",
        "feedback": "Loved the pacing",
        "rating": 4.5
    })
}

#[tokio::test]
#[serial]
async fn feedback_requires_an_enrollment() {
    let (app, db) = make_test_app().await;
    seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let student_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let class_id = approved_class(&db).await;

    let forbidden = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/feedbacks",
            Some(&student_token),
            Some(feedback_body(class_id)),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    EnrollmentLedger::new(db.clone())
        .enroll(class_id, "alice@test.com", 10.0)
        .await
        .unwrap();

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/feedbacks",
            Some(&student_token),
            Some(feedback_body(class_id)),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    assert_eq!(response_json(created).await["data"]["rating"], 4.5);

    // Same assignment title again conflicts.
    let duplicate = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/feedbacks",
            Some(&student_token),
            Some(feedback_body(class_id)),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    // The class page feedback listing needs no token.
    let listing = app
        .oneshot(request(
            "GET",
            &format!("/api/feedbacks?class_id={class_id}"),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
    assert_eq!(response_json(listing).await["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn out_of_range_rating_is_rejected() {
    let (app, db) = make_test_app().await;
    seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let student_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let class_id = approved_class(&db).await;
    EnrollmentLedger::new(db.clone())
        .enroll(class_id, "alice@test.com", 10.0)
        .await
        .unwrap();

    let mut body = feedback_body(class_id);
    body["rating"] = json!(5.5);
    let response = app
        .oneshot(request(
            "POST",
            "/api/feedbacks",
            Some(&student_token),
            Some(body),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn edit_and_delete_are_author_or_admin_only() {
    let (app, db) = make_test_app().await;
    seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let alice_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let bob_token = seed_user(&db, "bob@test.com", Role::Student).await;
    let admin_token = seed_user(&db, "admin@test.com", Role::Admin).await;
    let class_id = approved_class(&db).await;
    EnrollmentLedger::new(db.clone())
        .enroll(class_id, "alice@test.com", 10.0)
        .await
        .unwrap();

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/feedbacks",
            Some(&alice_token),
            Some(feedback_body(class_id)),
        ))
        .await
        .unwrap();
    let feedback_id = response_json(created).await["data"]["id"].as_i64().unwrap();
    let item_uri = format!("/api/feedbacks/{feedback_id}");

    let forbidden = app
        .clone()
        .oneshot(request(
            "PATCH",
            &item_uri,
            Some(&bob_token),
            Some(json!({ "rating": 1.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let edited = app
        .clone()
        .oneshot(request(
            "PATCH",
            &item_uri,
            Some(&alice_token),
            Some(json!({ "feedback": "Even better on reflection", "rating": 5.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(edited.status(), StatusCode::OK);
    let body = response_json(edited).await;
    assert_eq!(body["data"]["rating"], 5.0);
    assert_eq!(body["data"]["feedback"], "Even better on reflection");

    let forbidden_delete = app
        .clone()
        .oneshot(request("DELETE", &item_uri, Some(&bob_token), None))
        .await
        .unwrap();
    assert_eq!(forbidden_delete.status(), StatusCode::FORBIDDEN);

    let deleted = app
        .clone()
        .oneshot(request("DELETE", &item_uri, Some(&admin_token), None))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = app
        .oneshot(request("DELETE", &item_uri, Some(&admin_token), None))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
