//! Configuration management for plugin-agent
//!
//! Handles loading and merging configuration from multiple sources:
//! 1. Compiled defaults
//! 2. User config (~/.plugin-agent/config.toml)
//! 3. CLI-specified config file
//! 4. Environment variables
//! 5. CLI arguments (applied in main)

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
    pub plugin: PluginConfig,
    pub agent: AgentConfig,
    pub transcript: TranscriptConfig,
}

/// Chat model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Model identifier
    pub model: String,
    /// Chat completions endpoint URL
    pub endpoint: String,
    /// Environment variable containing API key
    pub api_key_env: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum tokens for response, provider default when unset
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds, none when unset
    pub timeout: Option<u64>,
}

/// Plugin discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Base URL used when DEV is "true"
    pub dev_url: String,
    /// Base URL used otherwise
    pub prod_url: String,
    /// Well-known manifest path appended to the base URL
    pub manifest_path: String,
    /// Request timeout in seconds for manifest and tool calls
    pub timeout: Option<u64>,
}

/// Agent loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Maximum Thought/Action rounds before the run is stopped
    pub max_iterations: usize,
    /// Log every reasoning step at info level
    pub verbose: bool,
}

/// Run transcript configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Write a JSON-lines record of every run
    pub enabled: bool,
    /// Transcript file path
    pub path: PathBuf,
    /// Maximum file size before rotation
    pub max_size: u64,
    /// Number of rotated files to keep
    pub retention: u32,
    /// Redact secrets from transcript entries
    pub redact_secrets: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.0,
            max_tokens: None,
            timeout: None,
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            dev_url: "http://localhost:3333".to_string(),
            prod_url: "https://solana-gpt-plugin.onrender.com".to_string(),
            manifest_path: "/.well-known/ai-plugin.json".to_string(),
            timeout: None,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            verbose: true,
        }
    }
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            enabled: true,
            path: home.join(".plugin-agent/logs/runs.jsonl"),
            max_size: 10 * 1024 * 1024, // 10MB
            retention: 5,
            redact_secrets: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load(cli_config: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".plugin-agent/config.toml");
            if user_config.exists() {
                debug!("Loading user config from {:?}", user_config);
                config.merge_from_file(&user_config)?;
            }
        }

        if let Some(path) = cli_config {
            debug!("Loading CLI config from {:?}", path);
            config.merge_from_file(path)?;
        }

        config.apply_env_overrides(|name| std::env::var(name).ok());

        Ok(config)
    }

    /// Merge configuration from a file
    fn merge_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let file_config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(format!("{}: {}", path.display(), e)))?;

        self.merge(file_config);
        Ok(())
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        let ai_defaults = AiConfig::default();
        if other.ai.model != ai_defaults.model {
            self.ai.model = other.ai.model;
        }
        if other.ai.endpoint != ai_defaults.endpoint {
            self.ai.endpoint = other.ai.endpoint;
        }
        if other.ai.api_key_env != ai_defaults.api_key_env {
            self.ai.api_key_env = other.ai.api_key_env;
        }
        if other.ai.temperature != ai_defaults.temperature {
            self.ai.temperature = other.ai.temperature;
        }
        if other.ai.max_tokens.is_some() {
            self.ai.max_tokens = other.ai.max_tokens;
        }
        if other.ai.timeout.is_some() {
            self.ai.timeout = other.ai.timeout;
        }

        let plugin_defaults = PluginConfig::default();
        if other.plugin.dev_url != plugin_defaults.dev_url {
            self.plugin.dev_url = other.plugin.dev_url;
        }
        if other.plugin.prod_url != plugin_defaults.prod_url {
            self.plugin.prod_url = other.plugin.prod_url;
        }
        if other.plugin.manifest_path != plugin_defaults.manifest_path {
            self.plugin.manifest_path = other.plugin.manifest_path;
        }
        if other.plugin.timeout.is_some() {
            self.plugin.timeout = other.plugin.timeout;
        }

        let agent_defaults = AgentConfig::default();
        if other.agent.max_iterations != agent_defaults.max_iterations {
            self.agent.max_iterations = other.agent.max_iterations;
        }
        if other.agent.verbose != agent_defaults.verbose {
            self.agent.verbose = other.agent.verbose;
        }

        let transcript_defaults = TranscriptConfig::default();
        if other.transcript.enabled != transcript_defaults.enabled {
            self.transcript.enabled = other.transcript.enabled;
        }
        if other.transcript.path != transcript_defaults.path {
            self.transcript.path = other.transcript.path;
        }
        if other.transcript.max_size != transcript_defaults.max_size {
            self.transcript.max_size = other.transcript.max_size;
        }
        if other.transcript.retention != transcript_defaults.retention {
            self.transcript.retention = other.transcript.retention;
        }
        if other.transcript.redact_secrets != transcript_defaults.redact_secrets {
            self.transcript.redact_secrets = other.transcript.redact_secrets;
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("PLUGIN_AGENT_MODEL") {
            self.ai.model = model;
        }
        if let Some(log) = lookup("PLUGIN_AGENT_LOG") {
            self.transcript.path = PathBuf::from(log);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ai.model.is_empty() {
            return Err(ConfigError::Invalid("ai.model must not be empty".to_string()));
        }
        if self.ai.endpoint.is_empty() {
            return Err(ConfigError::Invalid("ai.endpoint must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err(ConfigError::Invalid(format!(
                "ai.temperature must be between 0.0 and 2.0, got {}",
                self.ai.temperature
            )));
        }
        if self.agent.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "agent.max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get API key from environment
    pub fn get_api_key(&self) -> Option<String> {
        std::env::var(&self.ai.api_key_env).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ai.model, "gpt-3.5-turbo");
        assert_eq!(config.ai.temperature, 0.0);
        assert_eq!(config.plugin.dev_url, "http://localhost:3333");
        assert_eq!(config.agent.max_iterations, 15);
        assert!(config.ai.timeout.is_none());
        assert!(config.plugin.timeout.is_none());
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut config = Config::default();
        config.agent.max_iterations = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_temperature_out_of_range() {
        let mut config = Config::default();
        config.ai.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
            [ai]
            model = "gpt-4"
            timeout = 60

            [plugin]
            dev_url = "http://localhost:4000"

            [agent]
            max_iterations = 5
            verbose = false
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ai.model, "gpt-4");
        assert_eq!(config.ai.timeout, Some(60));
        assert_eq!(config.plugin.dev_url, "http://localhost:4000");
        assert_eq!(
            config.plugin.prod_url,
            "https://solana-gpt-plugin.onrender.com"
        );
        assert_eq!(config.agent.max_iterations, 5);
        assert!(!config.agent.verbose);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[plugin]\nprod_url = \"https://plugin.example.com\"").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.plugin.prod_url, "https://plugin.example.com");
        assert_eq!(config.plugin.dev_url, "http://localhost:3333");
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[plugin\nprod_url =").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_transcript_limits() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[transcript]\nmax_size = 1024\nretention = 2").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.transcript.max_size, 1024);
        assert_eq!(config.transcript.retention, 2);
        assert!(config.transcript.enabled);
    }

    #[test]
    fn test_later_file_keeps_earlier_sections() {
        let mut config = Config::default();
        config.merge(
            toml::from_str(
                "[agent]\nmax_iterations = 4\nverbose = false\n\n[transcript]\nenabled = false\nretention = 9",
            )
            .unwrap(),
        );
        config.merge(toml::from_str("[ai]\nmodel = \"gpt-4\"").unwrap());

        assert_eq!(config.ai.model, "gpt-4");
        assert_eq!(config.agent.max_iterations, 4);
        assert!(!config.agent.verbose);
        assert!(!config.transcript.enabled);
        assert_eq!(config.transcript.retention, 9);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(|name| match name {
            "PLUGIN_AGENT_MODEL" => Some("gpt-4o".to_string()),
            "PLUGIN_AGENT_LOG" => Some("/tmp/runs.jsonl".to_string()),
            _ => None,
        });
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.transcript.path, PathBuf::from("/tmp/runs.jsonl"));
    }
}
