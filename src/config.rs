/*
 * Responsibility
 * - Read environment once at startup (JWT secret, gate modes, header cap, TTLs, DB, CORS)
 * - Validate values (missing or unknown -> refuse to start)
 * - Nothing reads the environment after this; gates get their values injected
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::services::auth::token_codec::{ADMIN_TOKEN_TTL_SECONDS, USER_TOKEN_TTL_SECONDS};

pub const DEFAULT_MAX_HEADER_BYTES: usize = 4096;

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

/// Which credential the admin gate accepts. Exactly one per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAuthMode {
    /// `Authorization: Bearer <jwt>` with `is_admin = true`.
    Bearer,
    /// Legacy `Authorization: Basic <base64(user:pass)>` against the configured pair.
    Basic,
}

impl FromStr for AdminAuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bearer" => Ok(Self::Bearer),
            "basic" => Ok(Self::Basic),
            _ => Err(ConfigError::Invalid("ADMIN_AUTH_MODE")),
        }
    }
}

/// Which credential the user gate accepts. Exactly one per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAuthMode {
    /// `X-Telegram-ID: <opaque id>` resolved through the account lookup.
    Telegram,
    /// `Authorization: Bearer <jwt>` whose subject must be an existing user account.
    Bearer,
}

impl FromStr for UserAuthMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "telegram" => Ok(Self::Telegram),
            "bearer" => Ok(Self::Bearer),
            _ => Err(ConfigError::Invalid("USER_AUTH_MODE")),
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

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub jwt_secret: String,
    pub admin_auth_mode: AdminAuthMode,
    pub user_auth_mode: UserAuthMode,
    pub admin_user: Option<String>,
    pub admin_pass: Option<String>,

    pub max_header_bytes: usize,
    pub admin_token_ttl_seconds: u64,
    pub user_token_ttl_seconds: u64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets and the DSN (which may embed a password) stay out of logs.
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("admin_auth_mode", &self.admin_auth_mode)
            .field("user_auth_mode", &self.user_auth_mode)
            .field("max_header_bytes", &self.max_header_bytes)
            .field("admin_token_ttl_seconds", &self.admin_token_ttl_seconds)
            .field("user_token_ttl_seconds", &self.user_token_ttl_seconds)
            .finish_non_exhaustive()
    }
}

fn non_empty(key: &'static str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match non_empty(key) {
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parsed_or("PORT", 7000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = non_empty("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let jwt_secret = non_empty("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let admin_auth_mode = parsed_or("ADMIN_AUTH_MODE", AdminAuthMode::Bearer)?;
        let user_auth_mode = parsed_or("USER_AUTH_MODE", UserAuthMode::Bearer)?;

        let admin_user = non_empty("ADMIN_USER");
        let admin_pass = non_empty("ADMIN_PASS");
        if admin_auth_mode == AdminAuthMode::Basic {
            if admin_user.is_none() {
                return Err(ConfigError::Missing("ADMIN_USER"));
            }
            if admin_pass.is_none() {
                return Err(ConfigError::Missing("ADMIN_PASS"));
            }
        }

        let max_header_bytes = parsed_or("AUTH_MAX_HEADER_BYTES", DEFAULT_MAX_HEADER_BYTES)?;
        if max_header_bytes == 0 {
            return Err(ConfigError::Invalid("AUTH_MAX_HEADER_BYTES"));
        }

        let admin_token_ttl_seconds = parsed_or("ADMIN_TOKEN_TTL_SECONDS", ADMIN_TOKEN_TTL_SECONDS)?;
        let user_token_ttl_seconds = parsed_or("USER_TOKEN_TTL_SECONDS", USER_TOKEN_TTL_SECONDS)?;

        Ok(Self {
            addr,
            database_url,
            app_env,
            cors_allowed_origins,
            jwt_secret,
            admin_auth_mode,
            user_auth_mode,
            admin_user,
            admin_pass,
            max_header_bytes,
            admin_token_ttl_seconds,
            user_token_ttl_seconds,
        })
    }
}
