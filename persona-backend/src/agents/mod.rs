//! Agent personas and the runner that executes them.
//!
//! ```text
//! query → AgentRunner → model turn ─┬─ text        → final output
//!                                   └─ tool calls  → ToolRegistry → next turn
//! ```
//!
//! An agent can be wrapped as a tool (`AgentTool`) and handed to another
//! agent; invoking that tool runs the wrapped agent to completion through the
//! same runner.

pub mod agent;
pub mod agent_tool;
pub mod definitions;
pub mod runner;

pub use agent::{Agent, AgentConfigError, AgentRegistry};
pub use agent_tool::AgentTool;
pub use definitions::{create_default_agents, AGENT_NAMES, DEFAULT_MODEL};
pub use runner::{AgentRunner, RunError, RunResult};
