//! AI plugin manifest format
//!
//! The document served at `/.well-known/ai-plugin.json`. Only the fields the
//! agent reads are modelled; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Plugin manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    #[serde(default)]
    pub schema_version: Option<String>,
    /// Name the model uses to refer to the plugin
    pub name_for_model: String,
    /// Name shown to people
    pub name_for_human: String,
    /// Usage instructions aimed at the model
    pub description_for_model: String,
    /// Short summary aimed at people
    pub description_for_human: String,
    /// Where the plugin's API description lives
    pub api: ManifestApi,
    #[serde(default)]
    pub auth: Option<ManifestAuth>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub legal_info_url: Option<String>,
}

/// API section of the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestApi {
    /// API description format, normally "openapi"
    #[serde(rename = "type")]
    pub api_type: String,
    /// URL of the OpenAPI document
    pub url: String,
    #[serde(default)]
    pub is_user_authenticated: bool,
}

/// Auth section of the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestAuth {
    #[serde(rename = "type")]
    pub auth_type: String,
}

impl PluginManifest {
    /// Parse a manifest from its JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Description shown to the agent when it picks among tools
    pub fn tool_description(&self) -> String {
        format!(
            "Call this tool to get the OpenAPI spec (and usage guide) for interacting \
             with the {name} API. You should only call this ONCE! What is the {name} \
             API useful for? {summary}",
            name = self.name_for_human,
            summary = self.description_for_human
        )
    }

    /// Text returned when the agent invokes the plugin tool
    pub fn usage_guide(&self, openapi_spec: &str) -> String {
        format!(
            "Usage Guide: {}\n\nOpenAPI Spec: {}",
            self.description_for_model, openapi_spec
        )
    }
}
