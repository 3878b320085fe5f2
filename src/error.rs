//! Error types for plugin-agent

use thiserror::Error;

/// Main error type for plugin-agent
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Plugin error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    #[error("Agent error: {0}")]
    Agent(#[from] AgentError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Required environment variable {0} is not set")]
    MissingEnv(String),
}

/// Errors raised while fetching or parsing a plugin manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("Unexpected status {status} fetching {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed document at {url}: {message}")]
    Parse { url: String, message: String },
}

/// AI/LLM-related errors
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse AI response: {0}")]
    Parse(String),

    #[error("AI unavailable: {0}")]
    Unavailable(String),
}

/// Tool invocation errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Network error calling {url}: {message}")]
    Network { url: String, message: String },

    #[error("Invalid tool input: {0}")]
    InvalidInput(String),
}

/// Agent execution errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Model call failed: {0}")]
    Model(#[from] AiError),

    #[error("Tool '{tool}' failed: {source}")]
    Tool {
        tool: String,
        #[source]
        source: ToolError,
    },

    #[error("Could not parse LLM output: `{0}`")]
    OutputParse(String),

    #[error("Tool registry is empty")]
    EmptyRegistry,

    #[error("Tool registry has no plugin tool")]
    MissingPluginTool,
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
