use axum::http::StatusCode;
use chrono::{Duration, Utc};
use db::models::user::Role;
use sea_orm::DatabaseConnection;
use serde_json::json;
use serial_test::serial;
use services::class_workflow::{ClassWorkflow, NewClass};
use tower::ServiceExt;

use crate::helpers::app::{make_test_app, request, response_json, seed_user};

async fn approved_class(db: &DatabaseConnection, teacher_email: &str) -> i64 {
    let classes = ClassWorkflow::new(db.clone());
    let class = classes
        .create(NewClass {
            teacher_email: teacher_email.into(),
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

#[tokio::test]
#[serial]
async fn creation_is_gated_to_the_owning_teacher() {
    let (app, db) = make_test_app().await;
    let teacher_token = seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let other_token = seed_user(&db, "other@test.com", Role::Teacher).await;
    let class_id = approved_class(&db, "teacher@test.com").await;

    let deadline = (Utc::now() + Duration::days(7)).to_rfc3339();
    let body = json!({
        "class_id": class_id,
        "title": "Clay bowl",
        "description": "Throw and glaze a bowl",
        "deadline": deadline
    });

    let forbidden = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/assignments",
            Some(&other_token),
            Some(body.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/assignments",
            Some(&teacher_token),
            Some(body),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let assignment = response_json(created).await;
    assert_eq!(assignment["data"]["class_id"], class_id);
    assert_eq!(assignment["data"]["class_name"], "Sculpting");

    // Empty titles never reach the workflow.
    let invalid = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/assignments",
            Some(&teacher_token),
            Some(json!({
                "class_id": class_id,
                "title": "",
                "deadline": deadline
            })),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let listing = app
        .oneshot(request(
            "GET",
            &format!("/api/assignments?class_id={class_id}"),
            Some(&other_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::OK);
    assert_eq!(response_json(listing).await["data"].as_array().unwrap().len(), 1);
}
