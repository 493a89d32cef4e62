use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{self as core_config, get_env};
use service_core::error::AppError;
use std::env;

pub const DEFAULT_EXERCISE_API_URL: &str = "https://api.api-ninjas.com/v1/exercises";

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub exercise_api: ExerciseApiConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    MongoDb,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the service that issues bearer tokens.
    pub jwt_secret: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseApiConfig {
    pub base_url: String,
    pub api_key: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl ExerciseConfig {
    pub fn load() -> Result<Self, AppError> {
        // Handles .env and the APP__ prefix for the shared settings.
        let common_config = core_config::Config::load()?;
        let is_prod = core_config::is_production();

        Ok(ExerciseConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("exercise_db"), is_prod)?,
            },
            store: StoreConfig {
                backend: get_env("EXERCISE_STORE", Some("mongodb"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            },
            auth: AuthConfig {
                jwt_secret: Secret::new(get_env(
                    "AUTH_JWT_SECRET",
                    Some("dev-jwt-secret"),
                    is_prod,
                )?),
            },
            exercise_api: ExerciseApiConfig {
                base_url: get_env("EXERCISE_API_URL", Some(DEFAULT_EXERCISE_API_URL), is_prod)?,
                api_key: Secret::new(get_env("EXERCISE_API_KEY", Some(""), is_prod)?),
            },
            observability: ObservabilityConfig {
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::MongoDb),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid exercise store backend: {}", s)),
        }
    }
}
