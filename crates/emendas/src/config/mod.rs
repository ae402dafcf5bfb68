use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::workflows::edital::evaluation::EditalRules;

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
    pub edital: EditalConfig,
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
            edital: EditalConfig::from_env()?,
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

/// Scoring rules and analysis pacing for the current call.
#[derive(Debug, Clone)]
pub struct EditalConfig {
    pub rules: EditalRules,
    pub analysis_delay: Duration,
}

impl EditalConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut rules = EditalRules::default();

        if let Some(threshold) = parse_var::<u16>("EDITAL_APPROVAL_THRESHOLD")? {
            rules.approval_threshold = threshold;
        }
        if let Some(min) = parse_var::<u64>("EDITAL_BUDGET_MIN")? {
            rules.budget_band.min = min;
        }
        if let Some(max) = parse_var::<u64>("EDITAL_BUDGET_MAX")? {
            rules.budget_band.max = max;
        }
        if rules.budget_band.min > rules.budget_band.max {
            return Err(ConfigError::InvalidBudgetBand {
                min: rules.budget_band.min,
                max: rules.budget_band.max,
            });
        }
        if rules.approval_threshold > rules.max_score() {
            return Err(ConfigError::ThresholdAboveMaximum {
                threshold: rules.approval_threshold,
                max: rules.max_score(),
            });
        }

        let analysis_delay = parse_var::<u64>("EDITAL_ANALYSIS_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(Duration::ZERO);

        Ok(Self {
            rules,
            analysis_delay,
        })
    }
}

impl Default for EditalConfig {
    fn default() -> Self {
        Self {
            rules: EditalRules::default(),
            analysis_delay: Duration::ZERO,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { name: &'static str, value: String },
    InvalidBudgetBand { min: u64, max: u64 },
    ThresholdAboveMaximum { threshold: u16, max: u16 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "{name} must be a non-negative integer (got '{value}')")
            }
            ConfigError::InvalidBudgetBand { min, max } => {
                write!(f, "EDITAL_BUDGET_MIN ({min}) exceeds EDITAL_BUDGET_MAX ({max})")
            }
            ConfigError::ThresholdAboveMaximum { threshold, max } => write!(
                f,
                "EDITAL_APPROVAL_THRESHOLD ({threshold}) exceeds the maximum score ({max})"
            ),
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
