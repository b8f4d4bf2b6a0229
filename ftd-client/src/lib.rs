// Async Rust client for the Cisco Firepower Device Manager (FDM) REST API.
//
// Thin and typed: one method per object operation, no retries or caching.

pub mod api;
pub mod client;
pub mod error;
pub mod models;

pub use api::FtdApi;
pub use client::{DEFAULT_URL, HttpClient};
pub use error::Error;
