use crate::agents::Agent;
use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Exposes an agent as a tool. Calling it runs the agent on `input` and
/// returns the agent's final output as the tool result.
pub struct AgentTool {
    agent: Arc<Agent>,
    definition: ToolDefinition,
}

impl AgentTool {
    pub fn new(
        agent: Arc<Agent>,
        tool_name: impl Into<String>,
        tool_description: impl Into<String>,
    ) -> Self {
        AgentTool {
            agent,
            definition: ToolDefinition {
                name: tool_name.into(),
                description: tool_description.into(),
                input_schema: ToolInputSchema::object(
                    vec![("input", PropertySchema::string("The request for the agent."))],
                    &["input"],
                ),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct AgentToolParams {
    input: String,
}

#[async_trait]
impl Tool for AgentTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, context: &ToolContext) -> ToolResult {
        let params: AgentToolParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        let runner = match &context.runner {
            Some(runner) => runner,
            None => return ToolResult::error("Agent runner not available"),
        };

        log::info!(
            "[RUNNER] Delegating to '{}' via tool '{}'",
            self.agent.name,
            self.definition.name
        );

        match runner
            .run_at_depth(&self.agent, &params.input, context.delegation_depth + 1)
            .await
        {
            Ok(result) => ToolResult::success(result.final_output),
            Err(e) => {
                log::warn!("[RUNNER] Delegated agent '{}' failed: {}", self.agent.name, e);
                ToolResult::error(format!("Agent '{}' failed: {}", self.agent.name, e))
            }
        }
    }

    fn delegate(&self) -> Option<&Arc<Agent>> {
        Some(&self.agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::AgentRunner;
    use crate::ai::{AiClient, AiResponse, MockAiClient};
    use crate::tools::ToolRegistry;
    use serde_json::json;

    fn cook() -> Arc<Agent> {
        Arc::new(Agent::new("Cook", "gpt-4o-mini", "You cook.", ToolRegistry::new()))
    }

    #[test]
    fn test_definition_uses_custom_name() {
        let tool = cook().as_tool("cooking_agent", "Ask the cook");
        let def = tool.definition();
        assert_eq!(def.name, "cooking_agent");
        assert_eq!(def.description, "Ask the cook");
        assert_eq!(def.input_schema.required, vec!["input".to_string()]);
        assert_eq!(tool.delegate().map(|a| a.name.as_str()), Some("Cook"));
    }

    #[tokio::test]
    async fn test_execute_without_runner_fails() {
        let tool = cook().as_tool("cooking_agent", "Ask the cook");
        let result = tool.execute(json!({"input": "soup?"}), &ToolContext::default()).await;
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_execute_returns_agent_output() {
        let mock = MockAiClient::new(vec![Ok(AiResponse::text("Try dal makhni."))]);
        let runner = AgentRunner::new(Arc::new(AiClient::Mock(mock.clone())));
        let tool = cook().as_tool("cooking_agent", "Ask the cook");

        let result = tool
            .execute(json!({"input": "dinner idea?"}), &ToolContext::new(runner, 0))
            .await;

        assert!(result.success);
        assert_eq!(result.content, "Try dal makhni.");
        let trace = mock.trace();
        assert_eq!(trace[0].system_prompt(), Some("You cook."));
        assert_eq!(trace[0].user_query(), Some("dinner idea?"));
    }

    #[tokio::test]
    async fn test_failed_nested_run_is_error_result() {
        let mock = MockAiClient::new(vec![]);
        let runner = AgentRunner::new(Arc::new(AiClient::Mock(mock)));
        let tool = cook().as_tool("cooking_agent", "Ask the cook");

        let result = tool
            .execute(json!({"input": "dinner idea?"}), &ToolContext::new(runner, 0))
            .await;
        assert!(!result.success);
        assert!(result.content.contains("Cook"));
    }
}
