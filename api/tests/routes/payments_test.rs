use axum::http::StatusCode;
use db::models::user::Role;
use sea_orm::DatabaseConnection;
use serde_json::json;
use serial_test::serial;
use services::class_workflow::{ClassWorkflow, NewClass};
use services::enrollment::EnrollmentLedger;
use tower::ServiceExt;

use crate::helpers::app::{make_test_app, request, response_json, seed_user};

async fn seed_payment(db: &DatabaseConnection, student_email: &str) {
    let classes = ClassWorkflow::new(db.clone());
    let class = classes
        .create(NewClass {
            teacher_email: "teacher@test.com".into(),
            name: "Pottery".into(),
            image: None,
            price: 30.0,
            seats: 5,
            description: None,
            category: "art".into(),
        })
        .await
        .unwrap();
    classes.approve(class.id).await.unwrap();
    EnrollmentLedger::new(db.clone())
        .enroll(class.id, student_email, 30.0)
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
async fn listing_is_scoped_to_the_caller() {
    let (app, db) = make_test_app().await;
    seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let alice_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let bob_token = seed_user(&db, "bob@test.com", Role::Student).await;
    let admin_token = seed_user(&db, "admin@test.com", Role::Admin).await;
    seed_payment(&db, "alice@test.com").await;

    // No filter: the caller's own records.
    let own = app
        .clone()
        .oneshot(request("GET", "/api/payments", Some(&alice_token), None))
        .await
        .unwrap();
    assert_eq!(own.status(), StatusCode::OK);
    let body = response_json(own).await;
    assert_eq!(body["data"]["payments"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["payments"][0]["user_email"], "alice@test.com");

    let empty = app
        .clone()
        .oneshot(request("GET", "/api/payments", Some(&bob_token), None))
        .await
        .unwrap();
    assert!(response_json(empty).await["data"]["payments"]
        .as_array()
        .unwrap()
        .is_empty());

    // Bob cannot read Alice's records; admins can.
    let forbidden = app
        .clone()
        .oneshot(request(
            "GET",
            "/api/payments?email=alice@test.com",
            Some(&bob_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let all = app
        .oneshot(request("GET", "/api/payments", Some(&admin_token), None))
        .await
        .unwrap();
    assert_eq!(all.status(), StatusCode::OK);
    assert_eq!(
        response_json(all).await["data"]["payments"]
            .as_array()
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
#[serial]
async fn create_intent_validates_its_input() {
    let (app, db) = make_test_app().await;
    let token = seed_user(&db, "alice@test.com", Role::Student).await;

    let zero_amount = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/payments/create-intent",
            Some(&token),
            Some(json!({ "amount_cents": 0, "currency": "usd" })),
        ))
        .await
        .unwrap();
    assert_eq!(zero_amount.status(), StatusCode::BAD_REQUEST);

    let bad_currency = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/payments/create-intent",
            Some(&token),
            Some(json!({ "amount_cents": 1500, "currency": "dollars" })),
        ))
        .await
        .unwrap();
    assert_eq!(bad_currency.status(), StatusCode::BAD_REQUEST);

    let anonymous = app
        .oneshot(request(
            "POST",
            "/api/payments/create-intent",
            None,
            Some(json!({ "amount_cents": 1500, "currency": "usd" })),
        ))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
}
