use anyhow::{Context, Result};
use config::{Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub log_format: LogFormat,
    pub run_migrations: bool,
    pub static_dir: String,
}

impl Config {
    /// Defaults, then `stagebook.toml` if present, then the process environment
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::default().try_parsing(true))
    }

    pub fn load(env: Environment) -> Result<Self> {
        config::Config::builder()
            .set_default("server_host", "0.0.0.0")?
            .set_default("server_port", 3000)?
            .set_default("log_format", "pretty")?
            .set_default("run_migrations", true)?
            .set_default("static_dir", "static")?
            .add_source(File::with_name("stagebook").required(false))
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("DATABASE_URL must be set and every setting must be well formed")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
