//! Settings shared by the subcommands.
//!
//! Values come from built-in defaults, then an optional TOML file, then the
//! `DB_*` environment variables. Command-line flags are applied last by the
//! commands themselves.

use std::env;
use std::path::Path;
use std::path::PathBuf;

use ingester::destinations::postgres::PostgresConfig;
use serde::Deserialize;

use crate::error::Result;
use crate::tracing::LogLevel;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Db {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

impl From<&Db> for PostgresConfig {
    fn from(db: &Db) -> Self {
        PostgresConfig {
            host: db.host.clone(),
            port: db.port,
            name: db.name.clone(),
            user: db.user.clone(),
            password: db.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Data {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Load {
    pub batch_size: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Log {
    pub level: LogLevel,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub db: Db,
    pub data: Data,
    pub load: Load,
    pub log: Log,
}

const ENV_OVERRIDES: [(&str, &str); 5] = [
    ("db.host", "DB_HOST"),
    ("db.port", "DB_PORT"),
    ("db.name", "DB_NAME"),
    ("db.user", "DB_USER"),
    ("db.password", "DB_PASSWORD"),
];

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("db.host", "localhost")?
            .set_default("db.port", 5432_i64)?
            .set_default("db.name", "hotel_analytics")?
            .set_default("db.user", "postgres")?
            .set_default("db.password", "postgres")?
            .set_default("data.path", "data")?
            .set_default("load.batch_size", ingester::pipeline::DEFAULT_BATCH_SIZE as i64)?
            .set_default("log.level", "info")?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path.to_path_buf()));
        }

        for (key, var) in ENV_OVERRIDES {
            builder = builder.set_override_option(key, env::var(var).ok())?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}
