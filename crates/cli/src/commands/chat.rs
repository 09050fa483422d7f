//! Interactive chat command handler.
//!
//! Runs a `ChatSession` over stdin/stdout. The loop reads one line per
//! turn, so a turn is always settled before the next prompt appears.

use clap::Args;
use grounded_chat::{ChatSession, Message, Orchestrator};
use grounded_core::{config::AppConfig, AppResult};
use grounded_platform::create_transport;
use grounded_retrieval::{FilesetDirectory, DEFAULT_FILESET_ID};
use std::io::{self, BufRead, Write};

/// Interactive chat session
#[derive(Args, Debug)]
pub struct ChatCommand {}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");
        config.validate()?;

        let transport = create_transport(config)?;
        let directory = FilesetDirectory::new(transport.clone());
        let orchestrator = Orchestrator::new(transport, config.top_k);

        let fileset_id = config
            .fileset_id
            .clone()
            .unwrap_or_else(|| DEFAULT_FILESET_ID.to_string());
        let mut session = ChatSession::new(orchestrator, fileset_id);

        if let Some(welcome) = session.transcript().last() {
            print_reply(welcome);
        }
        println!("Commands: /filesets, /use <id>, exit");
        println!();

        let stdin = io::stdin();
        loop {
            print!("you> ");
            io::stdout().flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }
            let input = line.trim();

            match input {
                "" => continue,
                "exit" | "quit" => break,
                "/filesets" => {
                    for fileset in directory.list_selectable().await {
                        let marker = if fileset.id == session.fileset_id() {
                            "*"
                        } else {
                            " "
                        };
                        println!("{} {}  {}", marker, fileset.id, fileset.name);
                    }
                }
                _ if input == "/use" || input.starts_with("/use ") => {
                    let id = input.trim_start_matches("/use").trim();
                    if id.is_empty() {
                        println!("Usage: /use <fileset-id>");
                        continue;
                    }
                    session.select_fileset(id);
                    println!("Now chatting against {}", id);
                }
                _ => {
                    if let Some(reply) = session.submit(input).await {
                        print_reply(reply);
                    }
                }
            }
        }

        tracing::info!(
            messages = session.transcript().len(),
            "Chat session finished"
        );
        Ok(())
    }
}

/// Print a bot reply with its source attribution, if any.
fn print_reply(message: &Message) {
    println!("bot> {}", message.text);

    if let Some(ref sources) = message.sources {
        println!("     Sources: {}", sources.join(", "));
    }
}
