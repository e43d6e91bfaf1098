//! Application configuration, read from `settings.toml` next to the binary
//! with `TIMBERDESK_`-prefixed environment variables layered on top.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
    pub seed_demo: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite { path: String },
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    /// Defaults to an in-memory database when absent.
    pub database: Option<Database>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.level", "info")?
            .set_default("app.seed_demo", false)?
            .set_default("server.port", 3000)?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("TIMBERDESK").separator("__"))
            .build()?
            .try_deserialize()
    }
}
