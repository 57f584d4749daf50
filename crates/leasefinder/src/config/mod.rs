use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::configurator::ScoreConfig;

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

        let scoring = ScoringConfig {
            weights: env::var("APP_SCORE_WEIGHTS")
                .ok()
                .map(|raw| parse_weights(&raw))
                .transpose()?,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Deployment overrides for the lease-score weighting. The coefficients are
/// a commercial parameter owned outside this codebase; `APP_SCORE_WEIGHTS`
/// takes the payment, mileage, and term weights as a comma-separated triple
/// (for example `55,25,20`).
#[derive(Debug, Clone, Default)]
pub struct ScoringConfig {
    pub weights: Option<(f64, f64, f64)>,
}

impl ScoringConfig {
    pub fn score_config(&self) -> ScoreConfig {
        match self.weights {
            Some((payment, mileage, period)) => {
                ScoreConfig::default().with_weights(payment, mileage, period)
            }
            None => ScoreConfig::default(),
        }
    }
}

fn parse_weights(raw: &str) -> Result<(f64, f64, f64), ConfigError> {
    let invalid = || ConfigError::InvalidScoreWeights {
        value: raw.to_string(),
    };

    let mut parts = raw.split(',').map(str::trim);
    let payment = parts.next().ok_or_else(invalid)?;
    let mileage = parts.next().ok_or_else(invalid)?;
    let period = parts.next().ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }

    let parse = |part: &str| part.parse::<f64>().ok().filter(|weight| *weight >= 0.0);
    match (parse(payment), parse(mileage), parse(period)) {
        (Some(payment), Some(mileage), Some(period)) => Ok((payment, mileage, period)),
        _ => Err(invalid()),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidScoreWeights { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidScoreWeights { value } => {
                write!(
                    f,
                    "APP_SCORE_WEIGHTS must be three non-negative numbers, got '{}'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidScoreWeights { .. } => None,
        }
    }
}
