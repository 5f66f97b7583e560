//! Bookshelf API Library
//!
//! Users and books over HTTP, with books gated behind bearer-token
//! authentication. The binary in `main.rs` only wires configuration,
//! logging and the listener around `api::create_router`.

pub mod api;
pub mod auth;
pub mod collections;
pub mod config;
pub mod middleware;
pub mod models;

pub use api::{create_router, AppState};
pub use config::Config;
