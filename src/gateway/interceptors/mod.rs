//! The four stages of the default pipeline, in the order they run.

pub mod auth_gate;
pub mod proxy;
pub mod role_gate;
pub mod token_refresh;

pub use auth_gate::AuthGate;
pub use proxy::ApiProxy;
pub use role_gate::RoleGate;
pub use token_refresh::TokenRefresh;
