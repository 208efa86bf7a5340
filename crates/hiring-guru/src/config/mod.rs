use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_JUDGE_BASE_URL: &str = "https://judge0-ce.p.rapidapi.com";
const DEFAULT_JUDGE_HOST: &str = "judge0-ce.p.rapidapi.com";
const DEFAULT_AI_BACKEND_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_SESSION_COOKIE: &str = "hiring-guru-token";

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
    pub judge: JudgeConfig,
    pub ai: AiBackendConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let judge = JudgeConfig {
            base_url: env_or("JUDGE0_BASE_URL", DEFAULT_JUDGE_BASE_URL),
            api_key: env_or("JUDGE0_API_KEY", ""),
            host: env_or("JUDGE0_HOST", DEFAULT_JUDGE_HOST),
        };

        let profile_timeout_secs = match env::var("AI_PROFILE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber {
                    variable: "AI_PROFILE_TIMEOUT_SECS",
                })?,
            Err(_) => 30,
        };

        let ai = AiBackendConfig {
            base_url: env_or("AI_BACKEND_URL", DEFAULT_AI_BACKEND_URL),
            verification_token: env_or("AI_BACKEND_TOKEN", ""),
            api_key: env_or("AI_API_KEY", ""),
            profile_timeout: Duration::from_secs(profile_timeout_secs),
        };

        let session = SessionConfig {
            cookie_name: env_or("SESSION_COOKIE_NAME", DEFAULT_SESSION_COOKIE),
            secure_cookie: environment == AppEnvironment::Production,
            callback_secret: env_or("OAUTH_CALLBACK_SECRET", ""),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            judge,
            ai,
            session,
        })
    }
}

fn env_or(variable: &str, default: &str) -> String {
    env::var(variable)
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
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

/// Connection details for the external code judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeConfig {
    pub base_url: String,
    pub api_key: String,
    pub host: String,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_JUDGE_BASE_URL.to_string(),
            api_key: String::new(),
            host: DEFAULT_JUDGE_HOST.to_string(),
        }
    }
}

/// Connection details for the AI backend used for question generation and scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiBackendConfig {
    pub base_url: String,
    /// Bearer token for answer verification.
    pub verification_token: String,
    /// Bearer token for profile analysis.
    pub api_key: String,
    /// Only the profile analysis call is bounded.
    pub profile_timeout: Duration,
}

impl Default for AiBackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AI_BACKEND_URL.to_string(),
            verification_token: String::new(),
            api_key: String::new(),
            profile_timeout: Duration::from_secs(30),
        }
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure_cookie: bool,
    /// Shared with the OAuth gateway that signs login callbacks. Empty rejects every callback.
    pub callback_secret: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            secure_cookie: false,
            callback_secret: String::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable } => {
                write!(f, "{variable} must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
