//! HTTP REST API interfaces
//!
//! - `common`: response wrappers and the validating JSON extractor
//! - `modules`: request handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
