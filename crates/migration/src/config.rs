use config::Environment;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration build error: {0}")]
    Build(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

const SUPPORTED_SCHEMES: [&str; 3] = ["sqlite:", "postgres://", "postgresql://"];

#[derive(Clone, Debug, Deserialize)]
pub struct MigrationConfig {
    pub database_url: String,
}

impl MigrationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Validation("database_url must not be empty".into()));
        }
        if !SUPPORTED_SCHEMES
            .iter()
            .any(|scheme| self.database_url.starts_with(scheme))
        {
            return Err(ConfigError::Validation(format!(
                "database_url must start with one of {SUPPORTED_SCHEMES:?}"
            )));
        }
        Ok(())
    }
}

/// Load configuration from `.env`, `config.yaml` and the environment.
///
/// Environment variables override file values using the double underscore
/// key separator, so `DATABASE_URL` sets `database_url`. A missing
/// `config.yaml` is not an error as long as the environment supplies the
/// required keys.
pub fn load_config() -> Result<MigrationConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from("config.yaml")
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<MigrationConfig, ConfigError> {
    load_config_with(path, Environment::default().separator("__"))
}

/// Like [`load_config_from`], with the environment source supplied by the
/// caller (for example one backed by a fixed map via
/// [`Environment::source`]).
pub fn load_config_with(
    path: impl AsRef<Path>,
    environment: Environment,
) -> Result<MigrationConfig, ConfigError> {
    use config::{Config, File};
    let cfg = Config::builder()
        .add_source(File::from(path.as_ref()).required(false))
        .add_source(environment)
        .build()?;

    let app: MigrationConfig = cfg.try_deserialize()?;
    app.validate()?;
    Ok(app)
}
