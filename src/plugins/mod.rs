//! Plugin system for plugin-agent
//!
//! Discovers a hosted AI plugin through its well-known manifest and exposes
//! it, together with a generic HTTP POST tool, as tools the agent can call.

mod builtin;
mod executor;
mod loader;
mod manifest;
mod protocol;
mod registry;

pub use executor::ToolInvoker;
pub use loader::PluginLoader;
pub use registry::ToolRegistry;

#[cfg(test)]
pub use builtin::{BuiltinTools, REQUESTS_POST};
#[cfg(test)]
pub use protocol::{InvocationSchema, ToolDescriptor};

use crate::error::ManifestError;
use std::time::Duration;

/// Build the HTTP client shared by the loader and the tool invoker. No
/// timeout is applied unless one is configured.
pub fn http_client(timeout_secs: Option<u64>) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Load the plugin under `base_url` and assemble the run's tool registry
pub async fn load_registry(
    loader: &PluginLoader,
    base_url: &str,
) -> Result<ToolRegistry, ManifestError> {
    let plugin_tool = loader.load(base_url).await?;
    Ok(ToolRegistry::assemble(plugin_tool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_registry_order() {
        let mut server = mockito::Server::new_async().await;
        let manifest = serde_json::json!({
            "name_for_human": "Solana Labs",
            "name_for_model": "solana",
            "description_for_human": "Interact with the Solana blockchain",
            "description_for_model": "Fetch Solana balances",
            "api": { "type": "openapi", "url": format!("{}/openapi.json", server.url()) }
        });
        let _manifest = server
            .mock("GET", "/.well-known/ai-plugin.json")
            .with_status(200)
            .with_body(manifest.to_string())
            .create_async()
            .await;
        let _spec = server
            .mock("GET", "/openapi.json")
            .with_status(200)
            .with_body(r#"{"openapi": "3.0.1"}"#)
            .create_async()
            .await;

        let loader = PluginLoader::new(http_client(None).unwrap(), "/.well-known/ai-plugin.json");
        let registry = load_registry(&loader, &server.url()).await.unwrap();

        assert_eq!(registry.names(), vec![REQUESTS_POST, "solana"]);
    }

    #[tokio::test]
    async fn test_non_success_status_builds_no_registry() {
        let mut server = mockito::Server::new_async().await;
        let _manifest = server
            .mock("GET", "/.well-known/ai-plugin.json")
            .with_status(503)
            .create_async()
            .await;
        let spec = server
            .mock("GET", "/openapi.json")
            .expect(0)
            .create_async()
            .await;

        let loader = PluginLoader::new(http_client(None).unwrap(), "/.well-known/ai-plugin.json");
        let result = load_registry(&loader, &server.url()).await;

        assert!(matches!(result, Err(ManifestError::Status { status: 503, .. })));
        spec.assert_async().await;
    }

    #[test]
    fn test_http_client_with_timeout() {
        assert!(http_client(Some(5)).is_ok());
        assert!(http_client(None).is_ok());
    }
}
