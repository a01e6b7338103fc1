use crate::agents::{Agent, AgentConfigError, AgentRegistry};
use crate::tools::ToolRegistry;
use std::sync::Arc;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

pub const COOKING_ASSISTANT: &str = "Cooking Assistant";
pub const CODING_ASSISTANT: &str = "Coding Assistant";
pub const WEATHER_ASSISTANT: &str = "Weather Assistant";
pub const FINANCE_ASSISTANT: &str = "Finance Assistant";
pub const LANGUAGE_TRANSLATOR: &str = "Language Translator";

/// Agent names in picker order
pub const AGENT_NAMES: [&str; 5] = [
    COOKING_ASSISTANT,
    CODING_ASSISTANT,
    WEATHER_ASSISTANT,
    FINANCE_ASSISTANT,
    LANGUAGE_TRANSLATOR,
];

const COOKING_INSTRUCTIONS: &str = "\
You are a helpful cooking assistant who is specialized in cooking food.
You help the users with food options and recipes and help them cook food.
If a question is out of the scope of cooking, politely tell the user to select another agent.";

const CODING_INSTRUCTIONS: &str = "\
You are an expert coding assistant, particularly in Javascript. If any questions come out of \
scope of javascript, politely tell the user to select another agent.";

const WEATHER_INSTRUCTIONS: &str = "\
You are a helpful weather assistant. You provide accurate weather forecasts and current \
conditions based on the user's location.
If a question is out of the scope of weather, politely tell the user to select another agent.";

const FINANCE_INSTRUCTIONS: &str = "\
You are a professional finance assistant. You can explain financial concepts, and provide \
stock market data.
If a question is out of the scope of finance, politely tell the user to select another agent.";

const TRANSLATION_INSTRUCTIONS: &str = "\
You are a helpful language translator. You translate text from one language to another.
If a question is out of the scope of translation, politely tell the user to select another agent.";

fn pick(tools: &ToolRegistry, agent: &str, names: &[&str]) -> Result<ToolRegistry, AgentConfigError> {
    tools.subset(names).map_err(|reason| AgentConfigError::UnknownTool {
        agent: agent.to_string(),
        reason,
    })
}

/// Build the five personas from the built-in tool registry.
///
/// The coding agent gets the cooking agent as its `cooking_agent` tool.
pub fn create_default_agents(
    tools: &ToolRegistry,
    model: &str,
) -> Result<AgentRegistry, AgentConfigError> {
    let cooking = Arc::new(Agent::new(
        COOKING_ASSISTANT,
        model,
        COOKING_INSTRUCTIONS,
        pick(tools, COOKING_ASSISTANT, &["get_current_time", "get_menu"])?,
    ));

    let mut coding_tools = ToolRegistry::new();
    coding_tools.register(Arc::new(cooking.as_tool(
        "cooking_agent",
        "Invoke the Cooking Agent to answer food/menu questions",
    )));
    let coding = Arc::new(Agent::new(
        CODING_ASSISTANT,
        model,
        CODING_INSTRUCTIONS,
        coding_tools,
    ));

    let weather = Arc::new(Agent::new(
        WEATHER_ASSISTANT,
        model,
        WEATHER_INSTRUCTIONS,
        pick(tools, WEATHER_ASSISTANT, &["get_weather"])?,
    ));

    let finance = Arc::new(Agent::new(
        FINANCE_ASSISTANT,
        model,
        FINANCE_INSTRUCTIONS,
        pick(tools, FINANCE_ASSISTANT, &["get_stock_price"])?,
    ));

    let translation = Arc::new(Agent::new(
        LANGUAGE_TRANSLATOR,
        model,
        TRANSLATION_INSTRUCTIONS,
        pick(tools, LANGUAGE_TRANSLATOR, &["translate_text"])?,
    ));

    AgentRegistry::new(vec![cooking, coding, weather, finance, translation])
}
