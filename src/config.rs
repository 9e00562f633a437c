/*
 * Responsibility
 * - Load settings from the environment (database URLs, JWT secret, CORS allowlist, ...)
 * - Validate them up front (missing or malformed values fail startup)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
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
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub hr_database_url: String,
    pub payroll_database_url: String,
    pub db_max_connections: u32,
    pub db_retry_attempts: u32,
    pub db_retry_delay: Duration,

    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_ttl_seconds: u64,
    pub claim_cache_capacity: usize,
    pub bcrypt_cost: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets and connection strings stay out of logs
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_retry_attempts", &self.db_retry_attempts)
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("claim_cache_capacity", &self.claim_cache_capacity)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = env_or("PORT", 9000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins =
            split_origins(&std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        let hr_database_url =
            std::env::var("HR_DATABASE_URL").map_err(|_| ConfigError::Missing("HR_DATABASE_URL"))?;

        let payroll_database_url = std::env::var("PAYROLL_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("PAYROLL_DATABASE_URL"))?;

        let db_max_connections = env_or("DB_MAX_CONNECTIONS", 10)?;
        let db_retry_attempts = env_or("DB_RETRY_ATTEMPTS", 3)?;
        let db_retry_delay = Duration::from_millis(env_or("DB_RETRY_DELAY_MS", 1000)?);

        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let jwt_algorithm = parse_hmac_algorithm(
            &std::env::var("JWT_ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
        )
        .ok_or(ConfigError::Invalid("JWT_ALGORITHM"))?;

        let access_token_ttl_seconds =
            token_ttl(std::env::var("ACCESS_TOKEN_TTL_SECONDS").ok().as_deref())?;
        let claim_cache_capacity = env_or("CLAIM_CACHE_CAPACITY", 10_000)?;

        let bcrypt_cost = env_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid("BCRYPT_COST"));
        }

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            hr_database_url,
            payroll_database_url,
            db_max_connections,
            db_retry_attempts,
            db_retry_delay,
            jwt_secret,
            jwt_algorithm,
            access_token_ttl_seconds,
            claim_cache_capacity,
            bcrypt_cost,
        })
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    parse_or(key, std::env::var(key).ok().as_deref(), default)
}

/// Unset or blank takes the default; anything else must parse.
fn parse_or<T: FromStr>(
    key: &'static str,
    raw: Option<&str>,
    default: T,
) -> Result<T, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid(key)),
    }
}

/// Seconds, default 24h. Zero would issue tokens that are already expired.
fn token_ttl(raw: Option<&str>) -> Result<u64, ConfigError> {
    match parse_or("ACCESS_TOKEN_TTL_SECONDS", raw, 86_400)? {
        0 => Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS")),
        ttl => Ok(ttl),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Only the shared-secret family is accepted; tokens are signed and verified with one secret.
pub fn parse_hmac_algorithm(raw: &str) -> Option<Algorithm> {
    match Algorithm::from_str(raw.trim()).ok()? {
        alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) => Some(alg),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_or_blank_values_take_the_default() {
        assert_eq!(parse_or("PORT", None, 9000u16).unwrap(), 9000);
        assert_eq!(parse_or("PORT", Some("  "), 9000u16).unwrap(), 9000);
        assert_eq!(parse_or("PORT", Some(" 8080 "), 9000u16).unwrap(), 8080);
    }

    #[test]
    fn malformed_values_name_the_variable() {
        let err = parse_or("DB_MAX_CONNECTIONS", Some("ten"), 10u32).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("DB_MAX_CONNECTIONS")));
        assert_eq!(err.to_string(), "invalid configuration: DB_MAX_CONNECTIONS");

        assert!(matches!(
            parse_or("PORT", Some("70000"), 9000u16),
            Err(ConfigError::Invalid("PORT"))
        ));
        assert!(matches!(
            parse_or("ACCESS_TOKEN_TTL_SECONDS", Some("-1"), 86_400u64),
            Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))
        ));
    }

    #[test]
    fn token_ttl_must_be_positive() {
        assert_eq!(token_ttl(None).unwrap(), 86_400);
        assert_eq!(token_ttl(Some("60")).unwrap(), 60);
        assert!(matches!(
            token_ttl(Some("0")),
            Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"))
        ));
    }

    #[test]
    fn app_env_accepts_short_production_alias() {
        assert_eq!(AppEnv::parse("prod"), AppEnv::Production);
        assert_eq!(AppEnv::parse(" PRODUCTION "), AppEnv::Production);
        assert_eq!(AppEnv::parse("staging"), AppEnv::Development);
    }

    #[test]
    fn origins_are_trimmed_and_empty_entries_dropped() {
        let origins = split_origins(" http://localhost:5173 ,, https://hr.example.com,");
        assert_eq!(
            origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://hr.example.com".to_string()
            ]
        );
    }

    #[test]
    fn only_hmac_algorithms_are_accepted() {
        assert_eq!(parse_hmac_algorithm("HS256"), Some(Algorithm::HS256));
        assert_eq!(parse_hmac_algorithm("HS512"), Some(Algorithm::HS512));
        assert_eq!(parse_hmac_algorithm("RS256"), None);
        assert_eq!(parse_hmac_algorithm("nope"), None);
    }
}
