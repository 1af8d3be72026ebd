use axum::http::StatusCode;
use chrono::{Duration, Utc};
use db::models::user::Role;
use sea_orm::DatabaseConnection;
use serde_json::json;
use serial_test::serial;
use services::class_workflow::{ClassWorkflow, NewClass};
use services::enrollment::EnrollmentLedger;
use services::grading::{GradingWorkflow, NewAssignment};
use tower::ServiceExt;

use crate::helpers::app::{make_test_app, request, response_json, seed_user};

struct Fixture {
    class_id: i64,
    assignment_id: i64,
}

/// Approved class taught by `teacher@test.com` with one assignment due in
/// `hours` (negative means already past).
async fn fixture(db: &DatabaseConnection, hours: i64) -> Fixture {
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

    let assignment = GradingWorkflow::new(db.clone())
        .create_assignment(
            "teacher@test.com",
            Role::Teacher,
            NewAssignment {
                class_id: class.id,
                title: "Clay bowl".into(),
                description: None,
                deadline: Utc::now() + Duration::hours(hours),
            },
        )
        .await
        .unwrap();

    Fixture {
        class_id: class.id,
        assignment_id: assignment.id,
    }
}

async fn enroll(db: &DatabaseConnection, class_id: i64, email: &str) {
    EnrollmentLedger::new(db.clone())
        .enroll(class_id, email, 10.0)
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
async fn submitting_requires_an_enrollment() {
    let (app, db) = make_test_app().await;
    seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let student_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let f = fixture(&db, 24).await;

    let body = json!({ "assignment_id": f.assignment_id, "content": "my bowl" });
    let forbidden = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/submissions",
            Some(&student_token),
            Some(body.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    enroll(&db, f.class_id, "alice@test.com").await;
    let created = app
        .oneshot(request(
            "POST",
            "/api/submissions",
            Some(&student_token),
            Some(body),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let submission = response_json(created).await;
    assert_eq!(submission["data"]["student_email"], "alice@test.com");
    assert_eq!(submission["data"]["marks"], serde_json::Value::Null);
}

#[tokio::test]
#[serial]
async fn late_submission_conflicts() {
    let (app, db) = make_test_app().await;
    seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let student_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let f = fixture(&db, -1).await;
    enroll(&db, f.class_id, "alice@test.com").await;

    let response = app
        .oneshot(request(
            "POST",
            "/api/submissions",
            Some(&student_token),
            Some(json!({ "assignment_id": f.assignment_id, "content": "too late" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn grading_accepts_numbers_and_numeric_strings() {
    let (app, db) = make_test_app().await;
    let teacher_token = seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let student_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let f = fixture(&db, 24).await;
    enroll(&db, f.class_id, "alice@test.com").await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/submissions",
            Some(&student_token),
            Some(json!({ "assignment_id": f.assignment_id, "content": "my bowl" })),
        ))
        .await
        .unwrap();
    let submission_id = response_json(created).await["data"]["id"].as_i64().unwrap();
    let grade_uri = format!("/api/submissions/grade/{submission_id}");

    // Non-numeric and non-finite marks are rejected.
    for bad in [json!("abc"), json!("NaN"), json!(null)] {
        let response = app
            .clone()
            .oneshot(request(
                "PATCH",
                &grade_uri,
                Some(&teacher_token),
                Some(json!({ "marks": bad })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let as_string = app
        .clone()
        .oneshot(request(
            "PATCH",
            &grade_uri,
            Some(&teacher_token),
            Some(json!({ "marks": "87.5", "review": "good glaze" })),
        ))
        .await
        .unwrap();
    assert_eq!(as_string.status(), StatusCode::OK);
    let body = response_json(as_string).await;
    assert_eq!(body["data"]["marks"], 87.5);
    assert_eq!(body["data"]["review"], "good glaze");

    let as_number = app
        .oneshot(request(
            "PATCH",
            &grade_uri,
            Some(&teacher_token),
            Some(json!({ "marks": 91.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(as_number.status(), StatusCode::OK);
    assert_eq!(response_json(as_number).await["data"]["marks"], 91.0);
}

#[tokio::test]
#[serial]
async fn grading_is_gated_to_the_class_teacher() {
    let (app, db) = make_test_app().await;
    seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let other_token = seed_user(&db, "other@test.com", Role::Teacher).await;
    let student_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let f = fixture(&db, 24).await;
    enroll(&db, f.class_id, "alice@test.com").await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/submissions",
            Some(&student_token),
            Some(json!({ "assignment_id": f.assignment_id, "content": "my bowl" })),
        ))
        .await
        .unwrap();
    let submission_id = response_json(created).await["data"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/api/submissions/grade/{submission_id}"),
            Some(&other_token),
            Some(json!({ "marks": 50.0 })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[serial]
async fn listing_and_viewed_marker() {
    let (app, db) = make_test_app().await;
    let teacher_token = seed_user(&db, "teacher@test.com", Role::Teacher).await;
    let student_token = seed_user(&db, "alice@test.com", Role::Student).await;
    let f = fixture(&db, 24).await;
    enroll(&db, f.class_id, "alice@test.com").await;

    let created = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/submissions",
            Some(&student_token),
            Some(json!({ "assignment_id": f.assignment_id, "content": "my bowl" })),
        ))
        .await
        .unwrap();
    let submission_id = response_json(created).await["data"]["id"].as_i64().unwrap();

    // Students cannot browse the grading queue.
    let forbidden = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/submissions?assignment_id={}", f.assignment_id),
            Some(&student_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let queue = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/submissions?class_id={}", f.class_id),
            Some(&teacher_token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(queue.status(), StatusCode::OK);
    assert_eq!(response_json(queue).await["data"].as_array().unwrap().len(), 1);

    // A filter is required.
    let unfiltered = app
        .clone()
        .oneshot(request("GET", "/api/submissions", Some(&teacher_token), None))
        .await
        .unwrap();
    assert_eq!(unfiltered.status(), StatusCode::BAD_REQUEST);

    let mine = app
        .clone()
        .oneshot(request("GET", "/api/submissions/mine", Some(&student_token), None))
        .await
        .unwrap();
    assert_eq!(response_json(mine).await["data"].as_array().unwrap().len(), 1);

    let viewed_uri = format!("/api/submissions/viewed/{submission_id}");
    let once = app
        .clone()
        .oneshot(request(
            "PATCH",
            &viewed_uri,
            Some(&student_token),
            Some(json!({ "viewed_hash": "abc123" })),
        ))
        .await
        .unwrap();
    assert_eq!(once.status(), StatusCode::OK);

    let twice = app
        .oneshot(request(
            "PATCH",
            &viewed_uri,
            Some(&student_token),
            Some(json!({ "viewed_hash": "abc123" })),
        ))
        .await
        .unwrap();
    assert_eq!(response_json(twice).await["data"]["viewed_hash"], "abc123");
}
