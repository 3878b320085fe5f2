//! Plugin loader
//!
//! Fetches a plugin's well-known manifest and the OpenAPI document it points
//! at, and turns them into a tool descriptor.

use super::manifest::PluginManifest;
use super::protocol::{InvocationSchema, ToolDescriptor};
use crate::error::ManifestError;
use serde_json::Value;
use tracing::{debug, info};

/// Loads plugin descriptors over HTTP
pub struct PluginLoader {
    client: reqwest::Client,
    manifest_path: String,
}

impl PluginLoader {
    /// Create a new plugin loader
    pub fn new(client: reqwest::Client, manifest_path: &str) -> Self {
        Self {
            client,
            manifest_path: manifest_path.to_string(),
        }
    }

    /// Fetch and parse the plugin served under `base_url`
    pub async fn load(&self, base_url: &str) -> Result<ToolDescriptor, ManifestError> {
        let url = manifest_url(base_url, &self.manifest_path);
        info!("Loading plugin manifest from {}", url);

        let body = self.fetch(&url).await?;
        let manifest = PluginManifest::from_json(&body).map_err(|e| ManifestError::Parse {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let spec_url = resolve_api_url(base_url, &manifest.api.url);
        debug!("Fetching OpenAPI document from {}", spec_url);
        let spec_body = self.fetch(&spec_url).await?;
        let spec = parse_openapi(&spec_url, &spec_body)?;

        info!(
            "Loaded plugin '{}' ({})",
            manifest.name_for_model, manifest.name_for_human
        );

        Ok(ToolDescriptor {
            name: manifest.name_for_model.clone(),
            description: manifest.tool_description(),
            endpoint: Some(spec_url),
            schema: InvocationSchema::UsageGuide {
                guide: manifest.usage_guide(&spec),
            },
        })
    }

    /// GET a document, treating any non-2xx status as an error
    async fn fetch(&self, url: &str) -> Result<String, ManifestError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ManifestError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ManifestError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ManifestError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Join a base URL and the well-known manifest path
fn manifest_url(base_url: &str, manifest_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        manifest_path.trim_start_matches('/')
    )
}

/// Manifests may name the API document relative to the plugin host
fn resolve_api_url(base_url: &str, api_url: &str) -> String {
    if api_url.starts_with("http://") || api_url.starts_with("https://") {
        api_url.to_string()
    } else {
        manifest_url(base_url, api_url)
    }
}

/// Parse an OpenAPI document (JSON or YAML) and render it as compact JSON
fn parse_openapi(url: &str, text: &str) -> Result<String, ManifestError> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => serde_yml::from_str(text).map_err(|e| ManifestError::Parse {
            url: url.to_string(),
            message: e.to_string(),
        })?,
    };

    if !value.is_object() {
        return Err(ManifestError::Parse {
            url: url.to_string(),
            message: "OpenAPI document is not an object".to_string(),
        });
    }

    serde_json::to_string(&value).map_err(|e| ManifestError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}
