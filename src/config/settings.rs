use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{0} environment variable must be set")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

/// Controls whether internal error details are exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

/// Process-wide configuration, loaded once at startup and injected through
/// `AppData` rather than read as ambient globals.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Upper bound on pooled database connections
    pub max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expire_days: i64,
    /// Single origin allowed by CORS
    pub frontend_origin: String,
    pub environment: Environment,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", 5000)?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://bugtrail.db?mode=rwc".to_string());
        let max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 10)?;

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| SettingsError::MissingVar("JWT_SECRET"))?;
        let jwt_expire_days = parse_var("JWT_EXPIRE_DAYS", 7)?;

        let frontend_origin = env::var("FRONTEND_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let environment = match env::var("APP_ENV").map(|v| v.to_lowercase()).as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        Ok(Self {
            host,
            port,
            database_url,
            max_connections,
            jwt_secret,
            jwt_expire_days,
            frontend_origin,
            environment,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, SettingsError> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| SettingsError::InvalidVar { var, value }),
        Err(_) => Ok(default),
    }
}
