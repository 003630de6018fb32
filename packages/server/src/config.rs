use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally reachable base URL used when building download links,
    /// e.g. `http://localhost:3000`.
    pub public_url: String,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Connect, acquire, idle and lifetime timeout for pooled connections.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApodConfig {
    /// Metadata endpoint of the picture-of-the-day service.
    pub endpoint: String,
    pub api_key: String,
    /// Upper bound for a single outbound HTTP request.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Flat directory holding `{date}.{ext}` files.
    pub pictures_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WorkflowConfig {
    /// Deadline for one externally triggered operation.
    pub deadline_secs: u64,
}

impl WorkflowConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub apod: ApodConfig,
    pub storage: StorageConfig,
    pub workflow: WorkflowConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., PICDAY__APOD__API_KEY)
            .add_source(Environment::with_prefix("PICDAY").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.public_url", "http://127.0.0.1:3000")?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default("database.timeout_secs", 10)?
            .set_default("apod.endpoint", "https://api.nasa.gov/planetary/apod")?
            .set_default("apod.request_timeout_secs", 10)?
            .set_default("storage.pictures_dir", "./pictures")?
            .set_default("workflow.deadline_secs", 10)
    }
}
