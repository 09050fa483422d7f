//! Filesets command handler.
//!
//! Lists the selectable document collections: the built-in default followed
//! by the AI-enabled filesets the platform reports.

use clap::Args;
use grounded_core::{config::AppConfig, AppResult};
use grounded_platform::create_transport;
use grounded_retrieval::{FilesetDirectory, DEFAULT_FILESET_ID};

/// List selectable filesets
#[derive(Args, Debug)]
pub struct FilesetsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl FilesetsCommand {
    /// Execute the filesets command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing filesets command");
        config.validate()?;

        let transport = create_transport(config)?;
        let directory = FilesetDirectory::new(transport);

        let filesets = directory.list_selectable().await;

        if self.json {
            let json = serde_json::to_string_pretty(&filesets)
                .map_err(|e| grounded_core::AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            for fileset in &filesets {
                if fileset.id == DEFAULT_FILESET_ID {
                    println!("{}  {} (default)", fileset.id, fileset.name);
                } else {
                    println!("{}  {}", fileset.id, fileset.name);
                }
            }
        }

        Ok(())
    }
}
