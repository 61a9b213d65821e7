//! Application configuration
//!
//! Centralized configuration management using the `config` crate.
//! Values come from built-in defaults, optional config files and
//! `CARHIRE__`-prefixed environment variables, in that order.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use tracing::debug;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Pricing configuration handed to the pricing engine
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PricingConfig {
    /// Markup in percent used when a percentage-model supplier has no
    /// commission value of its own (15 means 15%)
    #[serde(default = "default_commission_percent")]
    pub commission_percent: Decimal,
}

fn default_commission_percent() -> Decimal {
    Decimal::from(15)
}

impl PricingConfig {
    /// Global markup as a decimal fraction (15% -> 0.15)
    pub fn commission_fraction(&self) -> Decimal {
        self.commission_percent / Decimal::from(100)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            commission_percent: default_commission_percent(),
        }
    }
}

/// Upstream search provider configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct UpstreamConfig {
    /// Search endpoint; the search API is disabled when unset
    pub search_url: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout_ms: u64,
}

fn default_upstream_timeout() -> u64 {
    5000
}

/// In-memory store configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// JSON catalog of suppliers and cars loaded at startup
    pub seed_path: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        debug!(run_mode = %run_mode, "Loading configuration");

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.cors_origins", default_cors_origins())?
            .set_default("pricing.commission_percent", "15")?
            .set_default("upstream.timeout_ms", 5000)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables with CARHIRE_ prefix
            .add_source(
                Environment::with_prefix("CARHIRE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
