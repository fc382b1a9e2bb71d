//! Layered configuration: built-in defaults, then an optional settings file, then
//! `TRIVIA__*` environment variables (`TRIVIA__SERVER__PORT=9000`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::trivia::pagination::{Pagination, DEFAULT_QUESTIONS_PER_PAGE};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub questions_per_page: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Reads `<file>.{toml,yaml,json,...}` if present, then the environment.
    pub fn load(file: &str) -> Result<Self, ConfigError> {
        Self::build(
            Config::builder()
                .add_source(File::with_name(file).required(false))
                .add_source(
                    Environment::with_prefix("TRIVIA")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let settings: Settings = builder
            .set_default("database.path", "trivia.db")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080_i64)?
            .set_default("questions_per_page", i64::from(DEFAULT_QUESTIONS_PER_PAGE))?
            .build()?
            .try_deserialize()?;
        if settings.questions_per_page == 0 {
            return Err(ConfigError::Message(
                "questions_per_page must be at least 1".to_owned(),
            ));
        }
        Ok(settings)
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.questions_per_page).unwrap_or_default()
    }
}
