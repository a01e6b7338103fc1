use crate::agents::agent_tool::AgentTool;
use crate::tools::ToolRegistry;
use std::collections::HashSet;
use std::sync::Arc;

/// An immutable persona: instructions plus the tools it may call
pub struct Agent {
    pub name: String,
    pub model: String,
    pub instructions: String,
    pub tools: ToolRegistry,
}

impl Agent {
    pub fn new(
        name: impl Into<String>,
        model: impl Into<String>,
        instructions: impl Into<String>,
        tools: ToolRegistry,
    ) -> Self {
        Agent {
            name: name.into(),
            model: model.into(),
            instructions: instructions.into(),
            tools,
        }
    }

    /// Wrap this agent as a tool another agent can call
    pub fn as_tool(
        self: &Arc<Self>,
        tool_name: impl Into<String>,
        tool_description: impl Into<String>,
    ) -> AgentTool {
        AgentTool::new(self.clone(), tool_name, tool_description)
    }

    /// Agents this agent can delegate to through its tools
    pub fn delegates(&self) -> Vec<Arc<Agent>> {
        self.tools
            .list()
            .iter()
            .filter_map(|t| t.delegate().cloned())
            .collect()
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("tools", &self.tools.names())
            .finish()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgentConfigError {
    #[error("duplicate agent name: {0}")]
    DuplicateName(String),
    #[error("agent delegation cycle: {0}")]
    DelegationCycle(String),
    #[error("agent '{agent}' references unknown tool: {reason}")]
    UnknownTool { agent: String, reason: String },
}

/// The fixed set of agents, looked up by exact name
#[derive(Debug, Clone)]
pub struct AgentRegistry {
    agents: Vec<Arc<Agent>>,
}

impl AgentRegistry {
    /// Build a registry, rejecting duplicate names and delegation cycles
    pub fn new(agents: Vec<Arc<Agent>>) -> Result<Self, AgentConfigError> {
        let mut seen = HashSet::new();
        for agent in &agents {
            if !seen.insert(agent.name.as_str()) {
                return Err(AgentConfigError::DuplicateName(agent.name.clone()));
            }
            check_delegation(agent, &mut Vec::new())?;
        }
        Ok(AgentRegistry { agents })
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<Arc<Agent>> {
        self.agents.iter().find(|a| a.name == name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.agents.iter().map(|a| a.name.as_str()).collect()
    }

    pub fn list(&self) -> &[Arc<Agent>] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

fn check_delegation(agent: &Arc<Agent>, path: &mut Vec<String>) -> Result<(), AgentConfigError> {
    if path.contains(&agent.name) {
        path.push(agent.name.clone());
        return Err(AgentConfigError::DelegationCycle(path.join(" -> ")));
    }
    path.push(agent.name.clone());
    for delegate in agent.delegates() {
        check_delegation(&delegate, path)?;
    }
    path.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(name: &str) -> Arc<Agent> {
        Arc::new(Agent::new(name, "gpt-4o-mini", "be brief", ToolRegistry::new()))
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = AgentRegistry::new(vec![bare("Weather Assistant")]).unwrap();
        assert!(registry.get("Weather Assistant").is_some());
        assert!(registry.get("weather assistant").is_none());
        assert!(registry.get("Weather Assistant ").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = AgentRegistry::new(vec![bare("A"), bare("B"), bare("A")]).unwrap_err();
        assert_eq!(err, AgentConfigError::DuplicateName("A".to_string()));
    }

    #[test]
    fn test_self_delegation_by_name_rejected() {
        let inner = bare("Loop");
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(inner.as_tool("loop_agent", "calls itself")));
        let outer = Arc::new(Agent::new("Loop", "gpt-4o-mini", "x", tools));

        let err = AgentRegistry::new(vec![outer]).unwrap_err();
        assert!(matches!(err, AgentConfigError::DelegationCycle(_)));
    }

    #[test]
    fn test_one_level_delegation_accepted() {
        let cook = bare("Cook");
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(cook.as_tool("cook_agent", "ask the cook")));
        let coder = Arc::new(Agent::new("Coder", "gpt-4o-mini", "x", tools));

        let registry = AgentRegistry::new(vec![cook, coder.clone()]).unwrap();
        assert_eq!(registry.names(), vec!["Cook", "Coder"]);
        let delegates = coder.delegates();
        assert_eq!(delegates.len(), 1);
        assert_eq!(delegates[0].name, "Cook");
    }
}
