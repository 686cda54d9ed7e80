//! Environment-driven configuration.
//!
//! Each submodule owns one concern and exposes a `from_env()` constructor
//! with sensible development defaults.
//!
//! - [`cors`]: allowed origins for the browser console
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: access token signing configuration
//! - [`server`]: listen address

pub mod cors;
pub mod database;
pub mod jwt;
pub mod server;
