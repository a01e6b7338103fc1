//! Terminal chat client for the persona backend.
//!
//! Commands: `/agents` lists agents, `/agent <name>` switches, `/html`
//! toggles printing replies as the HTML the web frontend renders, `/quit`
//! exits. Anything else is sent to the selected agent.

use dotenv::dotenv;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use persona_backend::agents::AGENT_NAMES;
use persona_backend::ui::{markup, ChatSession, HttpChatTransport};

const DEFAULT_API_URL: &str = "http://localhost:3001";

fn prompt(session: &ChatSession) {
    print!("[{}] > ", session.selected_agent());
    let _ = std::io::stdout().flush();
}

fn print_agents(session: &ChatSession) {
    for name in AGENT_NAMES {
        let marker = if name == session.selected_agent() { "*" } else { " " };
        println!(" {} {}", marker, name);
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let base_url = std::env::var("CHAT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let transport = HttpChatTransport::new(&base_url);
    let mut session = ChatSession::default();

    log::info!("Chatting via {}", transport.endpoint());
    println!("Agents:");
    print_agents(&session);
    println!("Type /agent <name> to switch, /html to toggle HTML output, /quit to exit.");
    let mut render_html = false;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(&session);

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();

        if line == "/quit" {
            break;
        } else if line == "/agents" {
            print_agents(&session);
        } else if line == "/html" {
            render_html = !render_html;
            println!("HTML output {}", if render_html { "on" } else { "off" });
        } else if let Some(name) = line.strip_prefix("/agent ") {
            if !session.select_agent(name.trim()) {
                println!("Unknown agent '{}'. Try /agents.", name.trim());
            }
        } else if let Some(reply) = session.submit(line, &transport).await {
            println!("{}", markup::render(&reply.text, render_html));
        }

        prompt(&session);
    }

    Ok(())
}
