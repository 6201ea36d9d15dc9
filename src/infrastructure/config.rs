use std::env;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the remote log store's REST API. When absent the service
    /// runs against the in-memory store (demo/dev mode).
    pub store_url: Option<String>,
    pub store_api_key: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            store_url: env::var("STORE_URL").ok().filter(|s| !s.is_empty()),
            store_api_key: env::var("STORE_API_KEY").unwrap_or_default(),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }
}
