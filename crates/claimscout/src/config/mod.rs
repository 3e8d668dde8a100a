//! Environment-backed configuration, including tracing setup.
//!
//! All knobs come from `APP_*` variables (a `.env` file is honored). The
//! matching floor policy is configurable here so a deployment can choose
//! whether unmatched settlements appear in questionnaire results.

use crate::matching::FloorPolicy;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use tracing_subscriber::EnvFilter;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub matching: MatchingConfig,
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_port = env_or("APP_PORT", "5000");
        let port = raw_port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort { value: raw_port })?;

        let raw_floor = env_or("APP_MATCH_FLOOR", "include");
        let floor_policy = match raw_floor.trim().to_ascii_lowercase().as_str() {
            "include" => FloorPolicy::AlwaysInclude,
            "omit" => FloorPolicy::OmitUnmatched,
            _ => return Err(ConfigError::InvalidFloorPolicy { value: raw_floor }),
        };

        Ok(Self {
            environment: AppEnvironment::from_str(&env_or("APP_ENV", "development")),
            server: ServerConfig {
                host: env_or("APP_HOST", "127.0.0.1"),
                port,
            },
            matching: MatchingConfig { floor_policy },
            log_level: env_or("APP_LOG_LEVEL", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = match self.host.as_str() {
            host if host.eq_ignore_ascii_case("localhost") => IpAddr::from([127, 0, 0, 1]),
            host => host.parse().map_err(|source| ConfigError::InvalidHost {
                host: host.to_string(),
                source,
            })?,
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Matching-engine knobs (`APP_MATCH_FLOOR`: `include` or `omit`).
#[derive(Debug, Clone, Copy)]
pub struct MatchingConfig {
    pub floor_policy: FloorPolicy,
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured
/// level; development builds keep event targets in the output.
pub fn init_telemetry(config: &AppConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            EnvFilter::try_new(&config.log_level).map_err(|_| TelemetryError::InvalidFilter {
                value: config.log_level.clone(),
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.environment == AppEnvironment::Development)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(|_| TelemetryError::AlreadyInitialized)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort {
        value: String,
    },
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
    InvalidFloorPolicy {
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort { value } => {
                write!(f, "APP_PORT '{}' is not a valid u16", value)
            }
            ConfigError::InvalidHost { host, .. } => {
                write!(
                    f,
                    "APP_HOST '{}' must be 'localhost' or an IPv4/IPv6 address",
                    host
                )
            }
            ConfigError::InvalidFloorPolicy { value } => {
                write!(f, "APP_MATCH_FLOOR '{}' must be 'include' or 'omit'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source, .. } => Some(source),
            ConfigError::InvalidPort { .. } | ConfigError::InvalidFloorPolicy { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum TelemetryError {
    /// The configured level/filter does not parse as an `EnvFilter`.
    InvalidFilter { value: String },
    /// A global subscriber is already installed, the only way `try_init`
    /// fails in this process.
    AlreadyInitialized,
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidFilter { value } => {
                write!(f, "APP_LOG_LEVEL '{}' is not a valid tracing filter", value)
            }
            TelemetryError::AlreadyInitialized => {
                write!(f, "a global tracing subscriber is already installed")
            }
        }
    }
}

impl std::error::Error for TelemetryError {}
