use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolInputSchema, ToolResult};
use async_trait::async_trait;
use chrono::Local;
use serde_json::Value;

/// Tool returning the server's current local time
pub struct CurrentTimeTool {
    definition: ToolDefinition,
}

impl CurrentTimeTool {
    pub fn new() -> Self {
        CurrentTimeTool {
            definition: ToolDefinition {
                name: "get_current_time".to_string(),
                description: "This tool returns the current time".to_string(),
                input_schema: ToolInputSchema::default(),
            },
        }
    }
}

impl Default for CurrentTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CurrentTimeTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, _params: Value, _context: &ToolContext) -> ToolResult {
        let now = Local::now();
        ToolResult::success(now.format("%a %b %d %Y %H:%M:%S GMT%z").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_non_empty_time() {
        let result = CurrentTimeTool::new()
            .execute(Value::Null, &ToolContext::default())
            .await;
        assert!(result.success);
        assert!(result.content.contains("GMT"));
    }
}
