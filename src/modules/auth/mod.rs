//! Backend auth service: login, profile and token refresh.
//!
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Credential checks and token minting
//! - `store.rs`: The in-memory credential store
//! - `model.rs`: Request and response DTOs
//! - `router.rs`: Axum router configuration

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
pub mod store;
