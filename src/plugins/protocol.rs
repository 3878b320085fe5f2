//! Tool descriptors
//!
//! A tool is plain data: a name, a description the model reads, the endpoint
//! it targets and the schema its input follows. Behaviour lives in the
//! single generic invoke operation of [`super::ToolInvoker`].

use serde::{Deserialize, Serialize};

/// A tool exposed to the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name the model writes after `Action:`
    pub name: String,
    /// Human-readable description listed in the prompt
    pub description: String,
    /// Target endpoint, if the tool is bound to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// How the tool's input is interpreted
    pub schema: InvocationSchema,
}

/// Invocation contract of a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvocationSchema {
    /// Input is a JSON string with `url` and `data` keys; `data` is POSTed
    /// to `url` and the response text is returned
    PostRequest,
    /// Input is ignored; the plugin's usage guide is returned
    UsageGuide { guide: String },
}

impl ToolDescriptor {
    /// Whether this descriptor was derived from a plugin manifest
    pub fn is_plugin(&self) -> bool {
        matches!(self.schema, InvocationSchema::UsageGuide { .. })
    }
}

/// Parsed input of a POST tool call
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostRequest {
    pub url: String,
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl PostRequest {
    /// Parse the raw text the model wrote after `Action Input:`.
    ///
    /// Models often wrap the JSON in quotes or backticks; those are stripped
    /// before parsing.
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .trim();
        let request: PostRequest = serde_json::from_str(trimmed)
            .map_err(|e| format!("expected JSON with \"url\" and \"data\" keys: {}", e))?;
        if request.url.is_empty() {
            return Err("\"url\" must not be empty".to_string());
        }
        Ok(request)
    }
}
