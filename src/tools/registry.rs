//! Tool registry for dynamic tool discovery and invocation.
//!
//! The ToolRegistry owns every registered tool, keyed by its descriptor
//! name. Orchestrators list descriptors to decide what to call and invoke
//! tools by name; tool failures come back as result strings.

use std::collections::HashMap;

use crate::core::tool::ToolDescriptor;
use crate::tools::config::ToolsConfig;
use crate::tools::search::BraveSearchTool;
use crate::tools::types::{Tool, ToolCallInput, ToolError};
use crate::tools::wikipedia::WikipediaTool;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("tool already registered: {0}")]
    DuplicateName(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("failed to build tool: {0}")]
    Build(#[from] ToolError),
}

/// Registry of available tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the web search and encyclopedia tools.
    pub fn with_default_tools(config: &ToolsConfig) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register(Box::new(BraveSearchTool::new(config.brave.clone())?))?;
        registry.register(Box::new(WikipediaTool::new(config.wikipedia.clone())?))?;
        Ok(registry)
    }

    /// Adds a tool. Names must be unique within the registry.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.descriptor().name.clone();
        if self.tools.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        tracing::debug!(tool = %name, "registered tool");
        self.tools.insert(name, tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All descriptors, sorted by name.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        let mut descriptors: Vec<&ToolDescriptor> =
            self.tools.values().map(|t| t.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Generate a detailed tool reference string for inclusion in LLM prompts.
    pub fn tool_reference_for_prompt(&self) -> String {
        let mut out = String::new();
        for tool in self.list() {
            out.push_str(&format!("### {}\n", tool.name));
            if let Some(title) = &tool.title {
                out.push_str(&format!("Title: {title}\n"));
            }
            out.push_str(&format!("{}\n", tool.description));
            out.push_str(&format!(
                "Input schema: {}\n\n",
                serde_json::to_string(&tool.input_json_schema()).unwrap_or_else(|_| "{}".to_string())
            ));
        }
        out
    }

    /// Invoke a tool by name with the given arguments.
    ///
    /// Only an unknown name is an error; anything that goes wrong inside
    /// the tool is part of the returned string.
    pub fn invoke(&self, call: ToolCallInput) -> Result<String, RegistryError> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| RegistryError::UnknownTool(call.name.clone()))?;
        Ok(tool.invoke(call.args))
    }
}
