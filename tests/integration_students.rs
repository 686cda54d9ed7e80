mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{generate_unique_student_id, response_json, seed_authenticated_user, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn create_request(token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/students/profile")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn sample_student(student_id: &str) -> serde_json::Value {
    json!({
        "studentId": student_id,
        "firstName": "Jo",
        "lastName": "Lee",
        "program": "Computer Science",
        "year": 1,
        "section": "A"
    })
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_success(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;
    let student_id = generate_unique_student_id();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(create_request(&token, sample_student(&student_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Student profile created successfully");
    assert_eq!(body["student"]["studentId"], student_id.as_str());
    assert_eq!(body["student"]["program"], "Computer Science");
    assert_eq!(body["student"]["year"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_requires_token(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/students/profile")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&sample_student("S1")).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_duplicate(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;
    let student_id = generate_unique_student_id();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(create_request(&token, sample_student(&student_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(create_request(&token, sample_student(&student_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Student profile already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_missing_fields(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(create_request(
            &token,
            json!({
                "studentId": "S1",
                "firstName": "Jo",
                "year": 0
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Missing required fields");
    assert_eq!(body["requiredFields"]["studentId"], true);
    assert_eq!(body["requiredFields"]["firstName"], true);
    assert_eq!(body["requiredFields"]["lastName"], false);
    assert_eq!(body["requiredFields"]["program"], false);
    // A zero year is indistinguishable from a missing one.
    assert_eq!(body["requiredFields"]["year"], false);
    assert_eq!(body["requiredFields"]["section"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_student_legacy_aliases(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;
    let student_id = generate_unique_student_id();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(create_request(
            &token,
            json!({
                "idNumber": student_id,
                "firstName": "Jo",
                "lastName": "Lee",
                "course": "Nursing",
                "year": 2,
                "section": "B"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_json(response).await;
    assert_eq!(body["student"]["studentId"], student_id.as_str());
    assert_eq!(body["student"]["program"], "Nursing");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_students_lists_all(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;
    let first = generate_unique_student_id();
    let second = generate_unique_student_id();

    for id in [&first, &second] {
        let app = setup_test_app(pool.clone()).await;
        let response = app
            .oneshot(create_request(&token, sample_student(id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/students")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let students = body.as_array().unwrap();
    assert!(students.iter().any(|s| s["studentId"] == first.as_str()));
    assert!(students.iter().any(|s| s["studentId"] == second.as_str()));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_student_profile(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;
    let student_id = generate_unique_student_id();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(create_request(&token, sample_student(&student_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/students/profile/{}", student_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["studentId"], student_id.as_str());
    assert_eq!(body["section"], "A");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_student_profile_not_found(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri("/api/students/profile/no-such-student")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Student profile not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_preserves_natural_key(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;
    let student_id = generate_unique_student_id();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(create_request(&token, sample_student(&student_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // The payload tries to change the key; only contactNumber may change.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/students/profile/{}", student_id))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({
                "studentId": "S2",
                "contactNumber": "555"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["student"]["studentId"], student_id.as_str());
    assert_eq!(body["student"]["contactNumber"], "555");
    // Untouched fields survive the partial update.
    assert_eq!(body["student"]["program"], "Computer Science");
    assert_eq!(body["student"]["year"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_not_found(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("PUT")
        .uri("/api/students/profile/no-such-student")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&json!({ "contactNumber": "555" })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student_then_not_found(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;
    let student_id = generate_unique_student_id();

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(create_request(&token, sample_student(&student_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/students/profile/{}", student_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Student profile deleted successfully");

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/students/profile/{}", student_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_test_create_validates_without_persisting(pool: PgPool) {
    let (_, token) = seed_authenticated_user(&pool).await;
    let student_id = generate_unique_student_id();

    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/students/test-create")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::from(
            serde_json::to_string(&sample_student(&student_id)).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["isValid"], true);

    // Nothing was written.
    let app = setup_test_app(pool.clone()).await;
    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/students/profile/{}", student_id))
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
