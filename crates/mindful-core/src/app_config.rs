use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub fetch_timeout_secs: u64,
    pub fetch_max_body_bytes: usize,
    pub user_agent: String,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,
    pub cache_sweep_interval_secs: u64,
    pub query_timeout_secs: u64,
    /// Replaces scheme/host/port of every store search URL when set.
    pub store_origin_override: Option<String>,
}
