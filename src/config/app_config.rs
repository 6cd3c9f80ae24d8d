//! Application configuration
//!
//! Provides TOML-based configuration with environment variable override
//! support. Priority: Environment variables > Config file > Defaults.
//!
//! The knowledge base identifier is the only required value; everything
//! else has a usable default. Credentials are optional on purpose: when
//! absent, the AWS SDK default credential chain takes over.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fallback region when none is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Configuration errors, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No knowledge base identifier was configured
    #[error("BEDROCK_KNOWLEDGE_BASE_ID is not set")]
    MissingKnowledgeBaseId,

    /// The configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// AWS region hosting the knowledge base
    #[serde(default = "default_aws_region")]
    aws_region: String,

    /// Bedrock knowledge base identifier (required)
    #[serde(default)]
    knowledge_base_id: Option<String>,

    /// Static access key id, used only together with the secret key
    #[serde(default)]
    aws_access_key_id: Option<String>,

    /// Static secret access key
    #[serde(default)]
    aws_secret_access_key: Option<String>,
}

fn default_aws_region() -> String {
    DEFAULT_AWS_REGION.to_string()
}

/// Default config file location: `$XDG_CONFIG_HOME/talent8/config.toml`,
/// falling back to `~/.config/talent8/config.toml`. `None` when neither
/// base directory can be determined.
fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
    Some(base.join("talent8").join("config.toml"))
}

/// Expand a leading `~/` in a user-supplied config path. Anything else,
/// including relative paths, is passed through untouched.
fn expand_config_path(path: &str) -> PathBuf {
    let expanded = path
        .strip_prefix("~/")
        .and_then(|rest| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(rest)));
    expanded.unwrap_or_else(|| PathBuf::from(path))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            aws_region: default_aws_region(),
            knowledge_base_id: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
        }
    }
}

impl AppConfig {
    /// Create config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(region) = std::env::var("AWS_REGION") {
            if !region.is_empty() {
                config.aws_region = region;
            }
        }

        if let Ok(id) = std::env::var("BEDROCK_KNOWLEDGE_BASE_ID") {
            config.knowledge_base_id = Some(id);
        }

        if let Ok(access_key_id) = std::env::var("AWS_ACCESS_KEY_ID") {
            config.aws_access_key_id = Some(access_key_id);
        }

        if let Ok(secret_access_key) = std::env::var("AWS_SECRET_ACCESS_KEY") {
            config.aws_secret_access_key = Some(secret_access_key);
        }

        config
    }

    /// Merge with another config (other takes priority for non-default values)
    pub fn merge_with(&self, other: &Self) -> Self {
        Self {
            aws_region: if other.aws_region != default_aws_region() {
                other.aws_region.clone()
            } else {
                self.aws_region.clone()
            },
            knowledge_base_id: other
                .knowledge_base_id
                .clone()
                .or_else(|| self.knowledge_base_id.clone()),
            aws_access_key_id: other
                .aws_access_key_id
                .clone()
                .or_else(|| self.aws_access_key_id.clone()),
            aws_secret_access_key: other
                .aws_secret_access_key
                .clone()
                .or_else(|| self.aws_secret_access_key.clone()),
        }
    }

    /// Load configuration: environment over the optional config file over
    /// defaults.
    ///
    /// An explicitly given path (`~/` expanded) must exist; the default
    /// config file (`<config dir>/config.toml`) is optional.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let file_config = match config_path {
            Some(path) => Some(Self::from_file(&expand_config_path(path))?),
            None => match default_config_path() {
                Some(path) if path.exists() => Some(Self::from_file(&path)?),
                _ => None,
            },
        };

        let env_config = Self::from_env();
        Ok(match file_config {
            Some(file_config) => file_config.merge_with(&env_config),
            None => env_config,
        })
    }

    /// The configured AWS region
    pub fn aws_region(&self) -> &str {
        &self.aws_region
    }

    /// The knowledge base identifier, if one was configured
    pub fn knowledge_base_id(&self) -> Option<&str> {
        self.knowledge_base_id.as_deref()
    }

    /// The knowledge base identifier, rejecting missing or empty values
    pub fn require_knowledge_base_id(&self) -> Result<&str, ConfigError> {
        match self.knowledge_base_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ConfigError::MissingKnowledgeBaseId),
        }
    }

    /// Static credential pair, present only when both halves are set
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (
            self.aws_access_key_id.as_deref(),
            self.aws_secret_access_key.as_deref(),
        ) {
            (Some(access_key_id), Some(secret_access_key))
                if !access_key_id.is_empty() && !secret_access_key.is_empty() =>
            {
                Some((access_key_id, secret_access_key))
            }
            _ => None,
        }
    }

    /// Override the knowledge base identifier
    pub fn with_knowledge_base_id(mut self, id: &str) -> Self {
        self.knowledge_base_id = Some(id.to_string());
        self
    }

    /// Override the AWS region
    pub fn with_aws_region(mut self, region: &str) -> Self {
        self.aws_region = region.to_string();
        self
    }
}
