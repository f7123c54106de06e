use anyhow::Context;

/// Shared-secret value the storefront integration sends in `x-wgss-source`.
pub const DEFAULT_SOURCE_KEY: &str = "woo";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub auth: AuthConfig,
}

/// Secrets checked by the route guards. Injected into `AppState` rather than
/// read from the environment per request.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub admin_key: String,
    pub source_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DB_MAX_CONNECTIONS must be a valid number")?,
            run_migrations: std::env::var("RUN_MIGRATIONS")
                .map(|v| parse_flag(&v))
                .unwrap_or(Ok(true))
                .context("RUN_MIGRATIONS must be true or false")?,
            auth: AuthConfig::from_env()?,
        })
    }
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let admin_key = std::env::var("ADMIN_KEY").context("ADMIN_KEY must be set")?;
        if admin_key.is_empty() {
            anyhow::bail!("ADMIN_KEY must not be empty");
        }

        Ok(Self {
            admin_key,
            source_key: std::env::var("WGSS_SOURCE_KEY")
                .unwrap_or_else(|_| DEFAULT_SOURCE_KEY.to_string()),
        })
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("unrecognised flag value {other:?}"),
    }
}
