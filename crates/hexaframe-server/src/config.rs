//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  Only
//! the binary owns config; the library crates are configured by explicit
//! construction.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--bind`)
//! 2. Environment variables: `HEXAFRAME_SERVER__BIND`, `HEXAFRAME_LOGGING__FORMAT`
//! 3. Config file passed with `--config` (TOML)
//! 4. Built-in defaults

use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const ENV_PREFIX: &str = "HEXAFRAME";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// `host:port` to listen on.
    pub bind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: DEFAULT_BIND.into(),
            },
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

/// Overrides coming from the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides<'a> {
    pub config_file: Option<&'a Path>,
    pub bind: Option<&'a str>,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load(overrides: &Overrides<'_>) -> anyhow::Result<Self> {
        Self::load_with_env(overrides, Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`load`](Self::load) with an explicit environment source.
    pub fn load_with_env(overrides: &Overrides<'_>, env: Environment) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("server.bind", defaults.server.bind)?
            .set_default("logging.format", "pretty")?;

        if let Some(path) = overrides.config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        builder = builder.add_source(env.prefix_separator("_").separator("__"));

        if let Some(bind) = overrides.bind {
            builder = builder.set_override("server.bind", bind)?;
        }

        let config = builder
            .build()
            .context("Failed to read configuration")?
            .try_deserialize::<Self>()
            .context("Invalid configuration")?;

        config.bind_addr()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        self.server
            .bind
            .parse()
            .with_context(|| format!("Invalid server.bind address '{}'", self.server.bind))
    }
}
