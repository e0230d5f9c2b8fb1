mod app_config;
mod config;
pub mod detect;
pub mod stores;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use detect::{detect_region, detect_store};
pub use stores::{PriceQuery, Region, Store};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown store: {0}")]
    UnknownStore(String),

    #[error("unknown region: {0}")]
    UnknownRegion(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
