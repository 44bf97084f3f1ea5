//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP server port for the lookup API.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    // === Geocoder ===
    /// Base URL of the ZIP-to-place API; the ZIP is appended as a path segment.
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,

    /// Total timeout for one geocode request in milliseconds.
    #[serde(default = "default_geocode_timeout_ms")]
    pub geocode_timeout_ms: u64,

    /// Connect timeout for the geocoder in milliseconds.
    #[serde(default = "default_geocode_connect_timeout_ms")]
    pub geocode_connect_timeout_ms: u64,

    // === Metrics ===
    /// Install the Prometheus exporter.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Port for the Prometheus exporter.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    // === Logging ===
    /// Log filter directives (`RUST_LOG`), e.g. `info` or `warn,tower_http=debug`.
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log this crate at debug level on top of `rust_log`.
    #[serde(default)]
    pub verbose: bool,
}

fn default_port() -> u16 {
    8080
}

fn default_bind_address() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_geocode_base_url() -> String {
    "https://api.zippopotam.us/us".to_string()
}

fn default_geocode_timeout_ms() -> u64 {
    5000
}

fn default_geocode_connect_timeout_ms() -> u64 {
    2000
}

fn default_true() -> bool {
    true
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            geocode_base_url: default_geocode_base_url(),
            geocode_timeout_ms: default_geocode_timeout_ms(),
            geocode_connect_timeout_ms: default_geocode_connect_timeout_ms(),
            metrics_enabled: default_true(),
            metrics_port: default_metrics_port(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        let url = Url::parse(&self.geocode_base_url)
            .map_err(|e| format!("GEOCODE_BASE_URL is not a valid URL: {}", e))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("GEOCODE_BASE_URL must use http or https".to_string());
        }

        if url.cannot_be_a_base() {
            return Err("GEOCODE_BASE_URL cannot be used as a base URL".to_string());
        }

        if self.geocode_timeout_ms == 0 {
            return Err("GEOCODE_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.geocode_connect_timeout_ms == 0 {
            return Err("GEOCODE_CONNECT_TIMEOUT_MS must be greater than 0".to_string());
        }

        if self.metrics_enabled && self.metrics_port == self.port {
            return Err("METRICS_PORT must differ from PORT".to_string());
        }

        Ok(())
    }

    /// Socket address for the HTTP server.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Socket address for the Prometheus exporter.
    pub fn metrics_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.metrics_port)
    }

    /// Geocode request timeout.
    pub fn geocode_timeout(&self) -> Duration {
        Duration::from_millis(self.geocode_timeout_ms)
    }

    /// Geocode connect timeout.
    pub fn geocode_connect_timeout(&self) -> Duration {
        Duration::from_millis(self.geocode_connect_timeout_ms)
    }

    /// Filter directives for the tracing subscriber.
    ///
    /// `cli_verbose` is the `--verbose` flag; either it or `VERBOSE` raises
    /// this crate to debug while `rust_log` still governs everything else.
    pub fn log_filter(&self, cli_verbose: bool) -> String {
        if cli_verbose || self.verbose {
            format!("utility_lookup=debug,{}", self.rust_log)
        } else {
            self.rust_log.clone()
        }
    }
}
