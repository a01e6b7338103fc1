use crate::agents::Agent;
use crate::ai::{AiClient, AiError, Message, MessageRole, ToolCall, ToolHistoryEntry, ToolResponse};
use crate::tools::ToolContext;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Maximum number of model turns per agent run
pub const MAX_TOOL_ITERATIONS: usize = 10;

/// Maximum nesting of agent-as-tool runs below the top-level agent
pub const MAX_DELEGATION_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub final_output: String,
    /// Model turns taken, including the final one
    pub iterations: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("AI generation error: {0}")]
    Ai(#[from] AiError),
    #[error("agent '{agent}' exceeded {limit} tool iterations")]
    MaxIterations { agent: String, limit: usize },
    #[error("agent '{0}' returned an empty response")]
    EmptyOutput(String),
    #[error("agent run timed out after {0:?}")]
    Timeout(Duration),
    #[error("delegation depth {depth} exceeds the limit of {limit}")]
    DelegationTooDeep { depth: usize, limit: usize },
}

/// Runs an agent for a single query and waits for its terminal output.
///
/// Cheap to clone; clones share the model client.
#[derive(Clone)]
pub struct AgentRunner {
    client: Arc<AiClient>,
    timeout: Option<Duration>,
}

impl AgentRunner {
    pub fn new(client: Arc<AiClient>) -> Self {
        AgentRunner {
            client,
            timeout: None,
        }
    }

    /// Bound each top-level run. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run `agent` on `query` as a top-level request
    pub async fn run(&self, agent: &Agent, query: &str) -> Result<RunResult, RunError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run_at_depth(agent, query, 0))
                .await
                .map_err(|_| RunError::Timeout(limit))?,
            None => self.run_at_depth(agent, query, 0).await,
        }
    }

    /// Run `agent` nested `depth` levels below the top-level agent
    pub async fn run_at_depth(
        &self,
        agent: &Agent,
        query: &str,
        depth: usize,
    ) -> Result<RunResult, RunError> {
        if depth > MAX_DELEGATION_DEPTH {
            return Err(RunError::DelegationTooDeep {
                depth,
                limit: MAX_DELEGATION_DEPTH,
            });
        }

        let messages = vec![
            Message::new(MessageRole::System, agent.instructions.clone()),
            Message::new(MessageRole::User, query),
        ];
        let tools = agent.tools.definitions();
        let context = ToolContext::new(self.clone(), depth);
        let mut tool_history: Vec<ToolHistoryEntry> = Vec::new();

        log::info!(
            "[RUNNER] Running '{}' (depth {}, provider {}, {} tools)",
            agent.name,
            depth,
            self.client.provider(),
            tools.len()
        );

        for iteration in 1..=MAX_TOOL_ITERATIONS {
            log::debug!("[RUNNER] '{}' iteration {}", agent.name, iteration);

            let response = self
                .client
                .generate_with_tools(&agent.model, messages.clone(), &tool_history, tools.clone())
                .await
                .inspect_err(|e| {
                    if e.is_client_error() {
                        log::error!("[RUNNER] Model rejected request for '{}': {}", agent.name, e);
                    }
                })?;

            if !response.has_tool_calls() {
                if response.content.trim().is_empty() {
                    return Err(RunError::EmptyOutput(agent.name.clone()));
                }
                log::info!(
                    "[RUNNER] '{}' finished after {} iteration(s)",
                    agent.name,
                    iteration
                );
                return Ok(RunResult {
                    final_output: response.content,
                    iterations: iteration,
                });
            }

            let tool_responses = self
                .execute_tool_calls(agent, &response.tool_calls, &context)
                .await;
            tool_history.push(ToolHistoryEntry::new(response.tool_calls, tool_responses));
        }

        log::warn!(
            "[RUNNER] '{}' exceeded max iterations ({})",
            agent.name,
            MAX_TOOL_ITERATIONS
        );
        Err(RunError::MaxIterations {
            agent: agent.name.clone(),
            limit: MAX_TOOL_ITERATIONS,
        })
    }

    /// Execute tool calls in order. Failures become error responses for the
    /// model rather than failing the run.
    async fn execute_tool_calls(
        &self,
        agent: &Agent,
        tool_calls: &[ToolCall],
        context: &ToolContext,
    ) -> Vec<ToolResponse> {
        let mut responses = Vec::with_capacity(tool_calls.len());

        for call in tool_calls {
            let start = Instant::now();
            let result = agent
                .tools
                .execute(&call.name, call.arguments.clone(), context)
                .await;

            log::info!(
                "[RUNNER] Tool '{}' for '{}' executed in {}ms, success: {}",
                call.name,
                agent.name,
                start.elapsed().as_millis(),
                result.success
            );
            if !result.success {
                log::debug!("[RUNNER] Tool '{}' error: {}", call.name, result.content);
            }

            responses.push(if result.success {
                ToolResponse::success(call.id.clone(), result.content)
            } else {
                ToolResponse::error(call.id.clone(), result.content)
            });
        }

        responses
    }
}
