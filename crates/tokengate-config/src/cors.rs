use std::env;

const DEFAULT_ORIGIN: &str = "http://localhost:3001";

/// Browser origins allowed to call the auth service directly.
///
/// The frontend normally talks to the gateway, which relays login and refresh
/// server-side; CORS only matters when a page on another origin calls the
/// auth service with credentials. Read from `ALLOWED_ORIGINS`
/// (comma-separated, default `http://localhost:3001`, the gateway).
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        Self::from_list(&raw)
    }

    /// Parses a comma-separated origin list, dropping blanks.
    pub fn from_list(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}
