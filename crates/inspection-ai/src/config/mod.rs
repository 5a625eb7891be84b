use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

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
    pub organization: String,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub ai: AiConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let organization =
            env::var("APP_ORGANIZATION").unwrap_or_else(|_| "demo-care-home".to_string());

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            organization,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            ai: AiConfig::from_env()?,
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

const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Reasoning-service settings. Built here and injected into the client and
/// evaluator explicitly; nothing in the engine reads ambient globals.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Ordered fallback chain of model identifiers tried front to back.
    pub model_chain: Vec<String>,
    pub attempts_per_model: u32,
    pub retry_backoff: Duration,
}

impl AiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("AI_API_KEY").ok().filter(|key| !key.is_empty());
        let base_url = env::var("AI_BASE_URL").unwrap_or_else(|_| DEFAULT_AI_BASE_URL.to_string());

        let model_chain = match env::var("AI_MODEL_CHAIN") {
            Ok(raw) => {
                let chain: Vec<String> = raw
                    .split(',')
                    .map(|model| model.trim().to_string())
                    .filter(|model| !model.is_empty())
                    .collect();
                if chain.is_empty() {
                    return Err(ConfigError::EmptyModelChain);
                }
                chain
            }
            Err(_) => Self::default_model_chain(),
        };

        let attempts_per_model = env::var("AI_RETRY_ATTEMPTS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidRetryAttempts)?;

        let backoff_ms = env::var("AI_RETRY_BACKOFF_MS")
            .unwrap_or_else(|_| "400".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidRetryBackoff)?;

        Ok(Self {
            api_key,
            base_url,
            model_chain,
            attempts_per_model,
            retry_backoff: Duration::from_millis(backoff_ms),
        })
    }

    pub fn default_model_chain() -> Vec<String> {
        vec![
            "gemini-2.0-flash".to_string(),
            "gemini-2.0-flash-lite".to_string(),
        ]
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            model_chain: Self::default_model_chain(),
            attempts_per_model: 2,
            retry_backoff: Duration::from_millis(400),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyModelChain,
    InvalidRetryAttempts,
    InvalidRetryBackoff,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyModelChain => {
                write!(f, "AI_MODEL_CHAIN must name at least one model")
            }
            ConfigError::InvalidRetryAttempts => {
                write!(f, "AI_RETRY_ATTEMPTS must be a non-negative integer")
            }
            ConfigError::InvalidRetryBackoff => {
                write!(f, "AI_RETRY_BACKOFF_MS must be a duration in milliseconds")
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
