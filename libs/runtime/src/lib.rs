//! Process-level plumbing shared by the MiniMarket binaries:
//! layered configuration and `tracing` subscriber setup.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
};
