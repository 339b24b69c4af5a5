use std::env;

/// The one account the credential store is seeded with at startup.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl SeedConfig {
    pub fn from_env() -> Self {
        Self {
            username: env::var("SEED_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            password: env::var("SEED_PASSWORD").unwrap_or_else(|_| "123456".to_string()),
            role: env::var("SEED_ROLE").unwrap_or_else(|_| "admin".to_string()),
        }
    }
}
