//! Tool executor
//!
//! The single generic invoke operation for every tool descriptor.

use super::protocol::{InvocationSchema, PostRequest, ToolDescriptor};
use crate::error::ToolError;
use tracing::debug;

/// Invokes tools on behalf of the agent
pub struct ToolInvoker {
    client: reqwest::Client,
}

impl ToolInvoker {
    /// Create a new tool invoker
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Run a tool with the raw input the model produced and return the
    /// observation text
    pub async fn invoke(&self, tool: &ToolDescriptor, input: &str) -> Result<String, ToolError> {
        match &tool.schema {
            InvocationSchema::PostRequest => {
                let request = PostRequest::parse(input).map_err(ToolError::InvalidInput)?;
                self.post(&request).await
            }
            InvocationSchema::UsageGuide { guide } => {
                debug!("Returning usage guide for '{}'", tool.name);
                Ok(guide.clone())
            }
        }
    }

    /// POST the request data as JSON. The body text is returned whatever the
    /// status, so the model can read error responses.
    async fn post(&self, request: &PostRequest) -> Result<String, ToolError> {
        debug!("POST {}", request.url);

        let response = self
            .client
            .post(&request.url)
            .json(&request.data)
            .send()
            .await
            .map_err(|e| ToolError::Network {
                url: request.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("POST {} returned {}", request.url, status);
        }

        response.text().await.map_err(|e| ToolError::Network {
            url: request.url.clone(),
            message: e.to_string(),
        })
    }
}
