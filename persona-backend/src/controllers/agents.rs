use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
struct AgentSummary {
    name: String,
    tools: Vec<String>,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/agents").route(web::get().to(list_agents)));
}

/// Selectable agents in picker order, with the tool names each one exposes
async fn list_agents(state: web::Data<AppState>) -> impl Responder {
    let agents: Vec<AgentSummary> = state
        .agents
        .list()
        .iter()
        .map(|agent| AgentSummary {
            name: agent.name.clone(),
            tools: agent.tools.names(),
        })
        .collect();

    HttpResponse::Ok().json(serde_json::json!({ "agents": agents }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{create_default_agents, AgentRunner, AGENT_NAMES, DEFAULT_MODEL};
    use crate::ai::{AiClient, MockAiClient};
    use crate::tools::create_default_registry;
    use actix_web::{test, App};
    use serde_json::Value;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_lists_agents_in_picker_order() {
        let agents = create_default_agents(&create_default_registry(), DEFAULT_MODEL).unwrap();
        let state = web::Data::new(AppState {
            agents: Arc::new(agents),
            runner: AgentRunner::new(Arc::new(AiClient::Mock(MockAiClient::new(vec![])))),
        });
        let app = test::init_service(App::new().app_data(state).configure(config)).await;

        let req = test::TestRequest::get().uri("/api/agents").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let listed: Vec<&str> = body["agents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["name"].as_str().unwrap())
            .collect();
        assert_eq!(listed, AGENT_NAMES.to_vec());
        assert_eq!(body["agents"][1]["tools"][0], "cooking_agent");
    }
}
