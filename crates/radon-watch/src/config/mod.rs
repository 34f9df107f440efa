use crate::risk::{EngineConfig, ValidationMode, DEFAULT_VARIANCE_FRACTION};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring engine tunables and optional reference data locations.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub variance_fraction: f64,
    /// Fixed seed for the perturbation; each call reseeds, so equal homes score equally.
    pub seed: Option<u64>,
    pub strict_validation: bool,
    pub factor_tables: Option<PathBuf>,
    pub survey_csv: Option<PathBuf>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            variance_fraction: DEFAULT_VARIANCE_FRACTION,
            seed: None,
            strict_validation: false,
            factor_tables: None,
            survey_csv: None,
        }
    }
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let variance_fraction = match env::var("APP_SCORE_VARIANCE") {
            Ok(raw) => parse_variance(&raw)?,
            Err(_) => DEFAULT_VARIANCE_FRACTION,
        };

        let seed = env::var("APP_SCORE_SEED")
            .ok()
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed(raw.clone()))
            })
            .transpose()?;

        let strict_validation = match env::var("APP_STRICT_VALIDATION") {
            Ok(raw) => parse_flag("APP_STRICT_VALIDATION", &raw)?,
            Err(_) => false,
        };

        Ok(Self {
            variance_fraction,
            seed,
            strict_validation,
            factor_tables: path_var("APP_FACTOR_TABLES"),
            survey_csv: path_var("APP_SURVEY_CSV"),
        })
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            variance_fraction: self.variance_fraction,
            validation: if self.strict_validation {
                ValidationMode::Strict
            } else {
                ValidationMode::Permissive
            },
        }
    }
}

fn parse_variance(raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && (0.0..=1.0).contains(&value) => Ok(value),
        _ => Err(ConfigError::InvalidVariance(raw.to_string())),
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: raw.to_string(),
        }),
    }
}

fn path_var(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidVariance(String),
    InvalidSeed(String),
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidVariance(value) => write!(
                f,
                "APP_SCORE_VARIANCE must be a number between 0 and 1 (got '{value}')"
            ),
            ConfigError::InvalidSeed(value) => {
                write!(f, "APP_SCORE_SEED must be a valid u64 (got '{value}')")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
