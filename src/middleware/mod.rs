//! Request extractors for the auth service.
//!
//! - [`auth`]: Bearer token verification for protected endpoints

pub mod auth;
