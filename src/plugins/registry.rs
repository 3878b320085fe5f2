//! Tool registry
//!
//! Ordered, append-only list of the tools offered to the agent.

use super::builtin::BuiltinTools;
use super::protocol::ToolDescriptor;

#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry for one run: the generic POST tool followed by the
    /// plugin tool
    pub fn assemble(plugin_tool: ToolDescriptor) -> Self {
        let mut registry = Self::new();
        registry.push(BuiltinTools::requests_post());
        registry.push(plugin_tool);
        registry
    }

    /// Append a tool. Names are not deduplicated; lookups return the first
    /// match.
    pub fn push(&mut self, tool: ToolDescriptor) {
        self.tools.push(tool);
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter()
    }

    /// Find a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn has_plugin_tool(&self) -> bool {
        self.tools.iter().any(ToolDescriptor::is_plugin)
    }
}
