//! Ask command handler.
//!
//! Runs a single orchestrated turn: retrieve, ground, generate, print.

use clap::Args;
use grounded_chat::Orchestrator;
use grounded_core::{config::AppConfig, AppResult};
use grounded_platform::create_transport;
use grounded_retrieval::DEFAULT_FILESET_ID;

/// Ask a single question against a fileset
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        config.validate()?;

        let question = self.question.trim();
        if question.is_empty() {
            return Err(grounded_core::AppError::Config(
                "No question provided".to_string(),
            ));
        }

        let transport = create_transport(config)?;
        let orchestrator = Orchestrator::new(transport, config.top_k);

        let fileset_id = config
            .fileset_id
            .clone()
            .unwrap_or_else(|| DEFAULT_FILESET_ID.to_string());
        tracing::debug!("Fileset: {}", fileset_id);

        let answer = orchestrator.answer(question, &fileset_id).await?;

        if self.json {
            // Output as structured JSON with attribution
            let output = serde_json::json!({
                "answer": answer.text,
                "sources": answer.sources,
                "fileset": fileset_id,
            });

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| grounded_core::AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", answer.text);

            if !answer.sources.is_empty() {
                println!();
                println!("Sources: {}", answer.sources.join(", "));
            }
        }

        Ok(())
    }
}
