//! PostgreSQL connection pool initialization.
//!
//! The connection string is read from the `DATABASE_URL` environment
//! variable; there is no fallback literal. The returned pool is cheaply
//! cloneable and shared through the application state.

use sqlx::PgPool;
use std::env;

/// Initializes the connection pool from `DATABASE_URL`.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the database is unreachable;
/// called once at startup.
pub async fn init_db_pool() -> PgPool {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to database")
}
