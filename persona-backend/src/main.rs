use actix_cors::Cors;
use actix_files::{Files, NamedFile};
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;

use persona_backend::agents::{self, AgentRunner};
use persona_backend::ai::{AiClient, OpenAIClient};
use persona_backend::config::Config;
use persona_backend::{controllers, tools, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let port = config.port;
    log::debug!("Loaded {:?}", config);

    log::info!("Initializing tool registry");
    let tool_registry = tools::create_default_registry();
    log::info!("Registered {} tools", tool_registry.len());

    let agent_registry = match agents::create_default_agents(&tool_registry, &config.model) {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            log::error!("Invalid agent configuration: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Loaded {} agents: {}",
        agent_registry.len(),
        agent_registry.names().join(", ")
    );

    let client = match OpenAIClient::new(&config.openai_api_key, Some(&config.openai_endpoint)) {
        Ok(client) => client,
        Err(e) => {
            log::error!("Failed to create OpenAI client: {}", e);
            std::process::exit(1);
        }
    };
    let runner = AgentRunner::new(Arc::new(AiClient::OpenAI(client))).with_timeout(config.run_timeout);
    let state = web::Data::new(AppState {
        agents: agent_registry,
        runner,
    });

    let static_dir = config.static_dir.clone();
    let serve_static = Path::new(&static_dir).is_dir();
    if serve_static {
        log::info!("Serving frontend from {}", static_dir);
    } else {
        log::info!("No frontend build at {}, serving API only", static_dir);
    }

    log::info!("Server running on http://localhost:{}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let app = App::new()
            .app_data(state.clone())
            .app_data(controllers::json_config())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::agents::config)
            .configure(controllers::chat::config);

        if !serve_static {
            return app;
        }

        // Serve static files, with SPA fallback to index.html for client-side routing
        let index = Path::new(&static_dir).join("index.html");
        app.service(
            Files::new("/", &static_dir)
                .index_file("index.html")
                .default_handler(move |req: actix_web::dev::ServiceRequest| {
                    let (http_req, _payload) = req.into_parts();
                    let index = index.clone();
                    async move {
                        let response = NamedFile::open(index)?.into_response(&http_req);
                        Ok(actix_web::dev::ServiceResponse::new(http_req, response))
                    }
                }),
        )
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
