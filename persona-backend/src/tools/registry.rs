use crate::agents::Agent;
use crate::tools::types::{ToolContext, ToolDefinition, ToolResult};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Trait that all tools must implement
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool definition for the AI API
    fn definition(&self) -> ToolDefinition;

    /// Executes the tool with already-validated parameters
    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult;

    /// Returns the tool's name
    fn name(&self) -> String {
        self.definition().name
    }

    /// The agent this tool runs, if it is a delegating tool
    fn delegate(&self) -> Option<&Arc<Agent>> {
        None
    }
}

/// Ordered set of tools keyed by name.
///
/// Built once and then only read, so it is shared behind `Arc` without locking.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        ToolRegistry {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. A tool with the same name is replaced in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name();
        match self.index.get(&name) {
            Some(&pos) => {
                log::warn!("[TOOLS] Replacing already registered tool '{}'", name);
                self.tools[pos] = tool;
            }
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&pos| self.tools[pos].clone())
    }

    /// List all registered tools in registration order
    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.clone()
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get tool definitions (for sending to AI)
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Build a new registry holding the named tools, in the order given
    pub fn subset(&self, names: &[&str]) -> Result<ToolRegistry, String> {
        let mut subset = ToolRegistry::new();
        for name in names {
            let tool = self
                .get(name)
                .ok_or_else(|| format!("Tool '{}' not found", name))?;
            subset.register(tool);
        }
        Ok(subset)
    }

    /// Execute a tool by name. Arguments are validated against the tool's
    /// input schema first; the tool body only runs when they conform.
    pub async fn execute(&self, name: &str, params: Value, context: &ToolContext) -> ToolResult {
        let tool = match self.get(name) {
            Some(t) => t,
            None => return ToolResult::error(format!("Tool '{}' not found", name)),
        };

        if let Err(e) = tool.definition().input_schema.validate(&params) {
            log::warn!("[TOOLS] Rejected arguments for '{}': {}", name, e);
            return ToolResult::error(format!("Invalid parameters: {}", e));
        }

        let params = if params.is_null() {
            Value::Object(serde_json::Map::new())
        } else {
            params
        };

        tool.execute(params, context).await
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get count of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
