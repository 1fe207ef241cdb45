use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings read from the process environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub retry_delay: Duration,
    pub upload_dir: PathBuf,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.key)
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                get("DB_USER").unwrap_or_else(|| "postgres".to_string()),
                get("DB_PASSWORD").unwrap_or_else(|| "admin123".to_string()),
                get("DB_HOST").unwrap_or_else(|| "postgres-db".to_string()),
                parse_or("DB_PORT", get("DB_PORT"), 5432u16)?,
                get("DB_NAME").unwrap_or_else(|| "onboarding".to_string()),
            ),
        };

        let mut allowed_origins: Vec<String> = get("ALLOWED_ORIGINS")
            .map(|list| {
                list.split(',')
                    .map(|origin| origin.trim().trim_end_matches('/').to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        if let Some(frontend) = get("FRONTEND_URL") {
            let frontend = frontend.trim().trim_end_matches('/').to_string();
            if !allowed_origins.contains(&frontend) {
                allowed_origins.push(frontend);
            }
        }

        Ok(Settings {
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 3420)?,
            database_url,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 20)?,
            acquire_timeout: Duration::from_secs(parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                get("DB_ACQUIRE_TIMEOUT_SECS"),
                5,
            )?),
            idle_timeout: Duration::from_secs(parse_or("DB_IDLE_TIMEOUT_SECS", get("DB_IDLE_TIMEOUT_SECS"), 30)?),
            retry_delay: Duration::from_secs(parse_or("DB_RETRY_DELAY_SECS", get("DB_RETRY_DELAY_SECS"), 5)?),
            upload_dir: PathBuf::from(get("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string())),
            allowed_origins,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError { key, value: raw }),
    }
}
