//! # configs
//!
//! Layered settings for the public and admin servers.
//!
//! Precedence, lowest first:
//! 1. built-in defaults
//! 2. `config/default.{toml,yaml,json}` and `config/local.*` (both optional)
//! 3. `MOMENTS__SECTION__KEY` environment variables
//! 4. the single-name variables `PORT`, `ADMIN_PORT`, `DATABASE_URL`, `FR_ORIGIN`
//!
//! A `.env` file in the working directory is loaded first, if present.

use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub mod telemetry;

pub use telemetry::init_tracing;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub admin: AdminSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub frontend: FrontendSettings,
    pub moderation: ModerationSettings,
    pub log: LogSettings,
}

/// Public API listener.
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Admin API listener. No authentication sits in front of it, so bind it to a
/// private interface.
#[derive(Debug, Deserialize)]
pub struct AdminSettings {
    pub host: String,
    pub port: u16,
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(deserialize_with = "secret_string")]
    pub url: SecretString,
    pub max_connections: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct CorsSettings {
    /// Exact origin allowed to call the public API with credentials.
    /// Absent means any origin, without credentials.
    pub allowed_origin: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FrontendSettings {
    /// Directory of the built frontend bundle. When set, the public server
    /// serves it with an `index.html` fallback.
    pub dist_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct ModerationSettings {
    /// When true, keeping a reported post also returns it to the feed with a
    /// clean report record.
    pub restore_on_keep: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

fn secret_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

/// Defaults plus file and prefixed-environment sources.
fn builder() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
    Ok(Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 4000_i64)?
        .set_default("admin.host", "127.0.0.1")?
        .set_default("admin.port", 4001_i64)?
        .set_default("admin.allowed_origin", "http://localhost:5173")?
        .set_default("database.url", "sqlite:moments.db")?
        .set_default("database.max_connections", 5_i64)?
        .set_default("moderation.restore_on_keep", false)?
        .set_default("log.level", "info")?
        .set_default("log.format", "pretty")?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(
            Environment::with_prefix("MOMENTS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        ))
}

/// Applies the single-name variables the deployment scripts already set.
fn with_plain_env(
    builder: ConfigBuilder<DefaultState>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigBuilder<DefaultState>, SettingsError> {
    Ok(builder
        .set_override_option("server.port", lookup("PORT"))?
        .set_override_option("admin.port", lookup("ADMIN_PORT"))?
        .set_override_option("database.url", lookup("DATABASE_URL"))?
        .set_override_option("cors.allowed_origin", lookup("FR_ORIGIN"))?)
}

/// Loads `.env`, then every configuration layer.
pub fn load() -> Result<Settings, SettingsError> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let settings = with_plain_env(builder()?, |key| std::env::var(key).ok())?
        .build()?
        .try_deserialize()?;
    Ok(settings)
}
