use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("MINDFUL_ENV", "development"))?;
    let bind_addr = parse_addr("MINDFUL_BIND_ADDR", "127.0.0.1:3000")?;
    let log_level = or_default("MINDFUL_LOG_LEVEL", "info");

    let fetch_timeout_secs = positive_u64("MINDFUL_FETCH_TIMEOUT_SECS", "15")?;
    let fetch_max_body_bytes = parse_usize("MINDFUL_FETCH_MAX_BODY_BYTES", "5242880")?;
    let user_agent = or_default("MINDFUL_USER_AGENT", DEFAULT_USER_AGENT);

    let cache_ttl_secs = parse_u64("MINDFUL_CACHE_TTL_SECS", "300")?;
    let cache_max_entries = parse_usize("MINDFUL_CACHE_MAX_ENTRIES", "1000")?;
    if cache_max_entries == 0 {
        return Err(invalid(
            "MINDFUL_CACHE_MAX_ENTRIES",
            "must be greater than zero".to_string(),
        ));
    }
    let cache_sweep_interval_secs = positive_u64("MINDFUL_CACHE_SWEEP_INTERVAL_SECS", "60")?;
    let query_timeout_secs = positive_u64("MINDFUL_QUERY_TIMEOUT_SECS", "30")?;

    let store_origin_override = lookup("MINDFUL_STORE_ORIGIN_OVERRIDE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        fetch_timeout_secs,
        fetch_max_body_bytes,
        user_agent,
        cache_ttl_secs,
        cache_max_entries,
        cache_sweep_interval_secs,
        query_timeout_secs,
        store_origin_override,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MINDFUL_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
