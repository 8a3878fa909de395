/*
 * Responsibility
 * - environment/config loading (DATABASE_URL, auth scheme, exempt paths)
 * - validation of required values (startup fails when missing)
 */
use std::net::SocketAddr;
use std::str::FromStr;
use std::{env, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Which credential-extraction strategy the auth middleware runs.
/// Selected by configuration, not subclassing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    Basic,
    Session,
}

impl AuthScheme {
    fn from_env() -> Result<Self, ConfigError> {
        match env::var("AUTH_SCHEME")
            .unwrap_or_else(|_| "session".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "basic" => Ok(Self::Basic),
            "session" => Ok(Self::Session),
            _ => Err(ConfigError::Invalid("AUTH_SCHEME")),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_EXEMPT_PATHS: &str = "/api/v1/status/,/api/v1/users/,/api/v1/sessions/";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub app_env: AppEnv,

    pub auth_scheme: AuthScheme,
    /// Path patterns the access policy exempts from authentication.
    pub auth_exempt_paths: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();
        let auth_scheme = AuthScheme::from_env()?;

        let auth_exempt_paths = env::var("AUTH_EXEMPT_PATHS")
            .unwrap_or_else(|_| DEFAULT_EXEMPT_PATHS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        Ok(Config {
            addr,
            database_url,
            app_env,
            auth_scheme,
            auth_exempt_paths,
        })
    }
}
