//! Configuration management for the Grounded CLI.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Environment variables
//! - Command-line flags
//! - Config files (`grounded.yaml`)
//!
//! Precedence is CLI flags > environment variables > config file > defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Default number of matches requested per retrieval call.
///
/// The retrieval depth is a tunable, not a contract: deployments have shipped
/// with both 1 and 3. Overridable via `GROUNDED_TOP_K`, the config file, or
/// the `--top-k` flag.
pub const DEFAULT_TOP_K: usize = 3;

/// Main application configuration.
///
/// This struct holds all global configuration options that affect
/// CLI behavior across commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the hosting platform instance (e.g. "https://acme.domo.com")
    pub instance: String,

    /// Access token for authenticated platform requests
    pub access_token: Option<String>,

    /// Environment variable to resolve the access token from
    pub token_env: Option<String>,

    /// Selected fileset id (None = the built-in default collection)
    pub fileset_id: Option<String>,

    /// Number of matches requested per retrieval call
    pub top_k: usize,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    platform: Option<PlatformSection>,
    retrieval: Option<RetrievalSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlatformSection {
    instance: Option<String>,
    #[serde(rename = "tokenEnv")]
    token_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RetrievalSection {
    fileset: Option<String>,
    #[serde(rename = "topK")]
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance: String::new(),
            access_token: None,
            token_env: None,
            fileset_id: None,
            top_k: DEFAULT_TOP_K,
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Environment variables:
    /// - `GROUNDED_CONFIG`: Path to config file
    /// - `DOMO_INSTANCE`: Platform instance base URL
    /// - `DOMO_ACCESS_TOKEN`: Access token for platform requests
    /// - `GROUNDED_FILESET`: Selected fileset id
    /// - `GROUNDED_TOP_K`: Retrieval depth
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(config_file) = std::env::var("GROUNDED_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        // Load from YAML config file if it exists
        let config_path = if let Some(ref cf) = config.config_file {
            cf.clone()
        } else {
            PathBuf::from("grounded.yaml")
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(instance) = std::env::var("DOMO_INSTANCE") {
            config.instance = instance;
        }

        if let Ok(fileset) = std::env::var("GROUNDED_FILESET") {
            config.fileset_id = Some(fileset);
        }

        if let Ok(top_k) = std::env::var("GROUNDED_TOP_K") {
            config.top_k = top_k.parse().map_err(|_| {
                AppError::Config(format!("Invalid GROUNDED_TOP_K value: {}", top_k))
            })?;
        }

        config.access_token = std::env::var("DOMO_ACCESS_TOKEN").ok();
        config.log_level = std::env::var("RUST_LOG").ok();

        // Check for NO_COLOR environment variable
        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &PathBuf) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(platform) = config_file.platform {
            if let Some(instance) = platform.instance {
                result.instance = instance;
            }
            if let Some(token_env) = platform.token_env {
                result.token_env = Some(token_env);
            }
        }

        if let Some(retrieval) = config_file.retrieval {
            if let Some(fileset) = retrieval.fileset {
                result.fileset_id = Some(fileset);
            }
            if let Some(top_k) = retrieval.top_k {
                result.top_k = top_k;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// This method merges command-line flags with the loaded configuration,
    /// giving precedence to CLI flags over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        config_file: Option<PathBuf>,
        instance: Option<String>,
        fileset: Option<String>,
        top_k: Option<usize>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(instance) = instance {
            self.instance = instance;
        }

        if let Some(fileset) = fileset {
            self.fileset_id = Some(fileset);
        }

        if let Some(top_k) = top_k {
            self.top_k = top_k;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve the access token, preferring an explicit token over `token_env`.
    pub fn resolve_access_token(&self) -> Option<String> {
        if let Some(ref token) = self.access_token {
            return Some(token.clone());
        }

        if let Some(ref env_var) = self.token_env {
            if let Ok(token) = std::env::var(env_var) {
                return Some(token);
            }
        }

        None
    }

    /// Validate configuration before issuing platform requests.
    pub fn validate(&self) -> AppResult<()> {
        if self.instance.is_empty() {
            return Err(AppError::Config(
                "No platform instance configured. Set DOMO_INSTANCE or the platform.instance config key".to_string(),
            ));
        }

        // The retrieval contract requires topK >= 1
        if self.top_k == 0 {
            return Err(AppError::Config(
                "top_k must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
