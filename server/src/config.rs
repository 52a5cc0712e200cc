use std::env;
use std::str::FromStr;

/// Server configuration, loaded from the environment. A malformed value
/// falls back to its compiled-in default rather than refusing to start.
#[derive(Clone)]
pub struct Config {
    /// Bind address (all interfaces by default).
    pub host: String,
    pub port: u16,
    /// Catalog size, fixed at process start.
    pub total_items: usize,
    pub items_per_page: usize,
    /// Artificial latency on the listing endpoint, to exercise client
    /// loading states. Zero disables it.
    pub sections_delay_ms: u64,
    /// Artificial latency on the detail endpoint.
    pub section_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 5174),
            total_items: env_or("TOTAL_ITEMS", 50),
            items_per_page: env_or("ITEMS_PER_PAGE", 10),
            sections_delay_ms: env_or("SECTIONS_DELAY_MS", 0),
            section_delay_ms: env_or("SECTION_DELAY_MS", 0),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
