// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub database_path: PathBuf,
    pub log_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);
        Self::load_from_file(&environment)
    }

    fn get_environment() -> String {
        std::env::var("F1WORK_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            anyhow::bail!(
                "config.yaml not found in current directory. Server cannot start without configuration."
            );
        }

        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        let env_config = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(Self {
            database_path: Self::resolve_path(&env_config.database_path)?,
            log_path: Self::resolve_path(&env_config.log_path)?,
        })
    }

    fn resolve_path(path: &PathBuf) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.clone())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// Ensure parent directories for the database and log file exist
    pub async fn ensure_directories(&self) -> Result<()> {
        for path in [&self.database_path, &self.log_path] {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

/// Settings for the identity provider the auth guard verifies tokens
/// against. All three come from the environment so deployments can point
/// at different projects without a rebuild.
#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub audience: String,
    pub issuer: String,
    pub keys_url: String,
}

impl IdentitySettings {
    pub fn from_env() -> Result<Self> {
        let audience = std::env::var("IDENTITY_AUDIENCE")
            .map_err(|_| anyhow::anyhow!("IDENTITY_AUDIENCE environment variable not set"))?;
        let issuer = std::env::var("IDENTITY_ISSUER")
            .map_err(|_| anyhow::anyhow!("IDENTITY_ISSUER environment variable not set"))?;
        let keys_url = std::env::var("IDENTITY_KEYS_URL")
            .map_err(|_| anyhow::anyhow!("IDENTITY_KEYS_URL environment variable not set"))?;

        Ok(Self {
            audience,
            issuer,
            keys_url,
        })
    }
}
