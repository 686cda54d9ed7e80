use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use registrar::config::cors::CorsConfig;
use registrar::config::jwt::JwtConfig;
use registrar::router::init_router;
use registrar::state::AppState;
use registrar::utils::password::hash_password;
use serde_json::json;
use sqlx::{PgPool, Postgres, Transaction};
use tower::ServiceExt;
use uuid::Uuid;

pub async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
    };
    init_router(state)
}

#[allow(dead_code)]
pub struct TestUser {
    pub user_id: String,
    pub email: String,
    pub password: String,
}

/// Insert a user directly, bypassing the registration endpoint.
#[allow(dead_code)]
pub async fn create_test_user(
    tx: &mut Transaction<'_, Postgres>,
    user_id: &str,
    email: &str,
    password: &str,
) -> TestUser {
    let hashed = hash_password(password).unwrap();

    sqlx::query(
        "INSERT INTO users (user_id, first_name, last_name, email, password)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user_id)
    .bind("Test")
    .bind("User")
    .bind(email)
    .bind(&hashed)
    .execute(&mut **tx)
    .await
    .unwrap();

    TestUser {
        user_id: user_id.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    }
}

/// Insert a user and log in, returning a bearer token for protected routes.
#[allow(dead_code)]
pub async fn seed_authenticated_user(pool: &PgPool) -> (TestUser, String) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(
        &mut tx,
        &generate_unique_user_id(),
        &generate_unique_email(),
        "testpass123",
    )
    .await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_auth_token(app, &user.email, &user.password).await;
    (user, token)
}

#[allow(dead_code)]
pub async fn get_auth_token(app: axum::Router, email: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/users/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": email,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["accessToken"].as_str().unwrap().to_string()
}

#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_user_id() -> String {
    format!("U-{}", Uuid::new_v4())
}

#[allow(dead_code)]
pub fn generate_unique_student_id() -> String {
    format!("S-{}", Uuid::new_v4())
}
