//! Request-processing middleware.
//!
//! - [`auth`]: bearer-token authentication extractor

pub mod auth;
