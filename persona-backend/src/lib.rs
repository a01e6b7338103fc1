//! Persona chat backend: a small set of tool-using agents behind one HTTP
//! endpoint, plus the client-side session logic that talks to it.

pub mod agents;
pub mod ai;
pub mod config;
pub mod controllers;
pub mod http;
pub mod tools;
pub mod ui;

use std::sync::Arc;

use agents::{AgentRegistry, AgentRunner};

/// Shared state handed to every request handler
pub struct AppState {
    pub agents: Arc<AgentRegistry>,
    pub runner: AgentRunner,
}
