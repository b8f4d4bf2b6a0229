//! FTD Core
//!
//! Host-side model shared by the provider and the CLI: attribute values,
//! resource schemas and the provider trait.

pub mod provider;
pub mod resource;
pub mod schema;
