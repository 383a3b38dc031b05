use dotenvy::dotenv;
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

use crate::error::{Error, Result};

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Full connection URL; takes precedence over the individual fields below
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_host")]
    pub db_host: String,
    #[serde(default = "default_port")]
    pub db_port: u16,
    #[serde(default = "default_name")]
    pub db_name: String,
    #[serde(default = "default_user")]
    pub db_user: String,
    #[serde(default)]
    pub db_password: Option<String>,
    /// Filter directive used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_name() -> String {
    "postgres".to_string()
}

fn default_user() -> String {
    "postgres".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Build a configuration from an explicit set of variables instead of the process environment
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, Config>(vars)?)
    }

    /// Connection options for the store, either parsed from `DATABASE_URL` or assembled from the parts
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.database_url {
            return url
                .parse::<PgConnectOptions>()
                .map_err(|source| Error::InvalidDatabaseUrl {
                    url: url.clone(),
                    source,
                });
        }

        let mut options = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .database(&self.db_name)
            .username(&self.db_user);

        if let Some(password) = &self.db_password {
            options = options.password(password);
        }

        Ok(options)
    }
}
