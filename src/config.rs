use crate::error::AppError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# Sitegauge default configuration
[server]
host = "127.0.0.1"
port = 8612

[model]
name = "gpt-4.1"
api_base = "https://api.openai.com/v1"
# Prefer the OPENAI_API_KEY environment variable; this value is a fallback.
api_key = "your-api-key-here"
"#;

/// Value shipped in the default config file; treated the same as an unset key.
const API_KEY_PLACEHOLDER: &str = "your-api-key-here";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model_name() -> String {
    crate::prompt::DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Config {
    pub fn load_auto() -> Result<Self> {
        if let Ok(path) = env::var("SITEGAUGE_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::load(&path.to_string_lossy());
            } else {
                tracing::warn!(
                    "SITEGAUGE_CONFIG points to non-existent file: {}",
                    path.display()
                );
            }
        }

        Self::load_from_user_config()
    }

    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let cfg: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML from {}", path))?;
        Ok(cfg)
    }

    fn user_config_path() -> Result<PathBuf> {
        let home = env::var("HOME").context("HOME env var not set")?;
        Ok(Path::new(&home)
            .join(".config")
            .join("sitegauge")
            .join("config.toml"))
    }

    fn ensure_user_config_exists() -> Result<PathBuf> {
        let path = Self::user_config_path()?;
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
            }
        }
        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        }
        Ok(path)
    }

    pub fn load_from_user_config() -> Result<Self> {
        let path = Self::ensure_user_config_exists()?;
        Self::load(&path.to_string_lossy())
    }

    /// Resolves the API credential once at startup. `OPENAI_API_KEY` in the
    /// environment wins over the config file; the shipped placeholder counts
    /// as unset. Missing credential is fatal before the server binds.
    pub fn resolve_api_key(&self) -> std::result::Result<String, AppError> {
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        match self.model.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() && key != API_KEY_PLACEHOLDER => {
                Ok(key.to_string())
            }
            _ => Err(AppError::Config(
                "OpenAI API key is not configured. Set OPENAI_API_KEY or model.api_key in the config file.".to_string(),
            )),
        }
    }
}
