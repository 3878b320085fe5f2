//! Built-in tools
//!
//! Tools that exist without any plugin being loaded.

use super::protocol::{InvocationSchema, ToolDescriptor};

/// Name of the generic POST tool
pub const REQUESTS_POST: &str = "requests_post";

const REQUESTS_POST_DESCRIPTION: &str = "Use this when you want to POST to a website.
    Input should be a json string with two keys: \"url\" and \"data\".
    The value of \"url\" should be a string, and the value of \"data\" should be a dictionary of
    key-value pairs you want to POST to the url.
    Be careful to always use double quotes for strings in the json string
    The output will be the text response of the POST request.";

/// Built-in tools that don't require a plugin
pub struct BuiltinTools;

impl BuiltinTools {
    /// Generic HTTP POST tool
    pub fn requests_post() -> ToolDescriptor {
        ToolDescriptor {
            name: REQUESTS_POST.to_string(),
            description: REQUESTS_POST_DESCRIPTION.to_string(),
            endpoint: None,
            schema: InvocationSchema::PostRequest,
        }
    }
}
