//! Prompt construction for grounded answering.
//!
//! Retrieved snippets are concatenated into a grounding block and wrapped,
//! together with the user's question, in a fixed instruction template.

use grounded_core::{AppError, AppResult};
use grounded_retrieval::RetrievalMatch;
use handlebars::Handlebars;
use std::collections::HashMap;

/// Separator between grounding block segments.
pub const SEGMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Instruction template wrapping the grounding block and the user question.
///
/// The wording tells the generator to answer from the documentation, to say
/// so when the answer is absent, and permits a best-effort general-knowledge
/// fallback.
const GROUNDED_TEMPLATE: &str = "You are a helpful assistant. Use the following retrieved documentation to answer the user's question. If the answer is not in the documentation, say so, but try to be helpful based on general knowledge if possible.\n\nDOCUMENTATION:\n{{documentation}}\n\nUSER QUESTION:\n{{question}}";

/// Build the grounding block from retrieval matches.
///
/// One `[Source: <path>]` header per match, in match order, segments joined
/// by [`SEGMENT_SEPARATOR`].
pub fn build_grounding_block(matches: &[RetrievalMatch]) -> String {
    matches
        .iter()
        .map(|m| format!("[Source: {}]\n{}", m.metadata.path, m.content.text))
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

/// Build the final generation prompt for a query.
///
/// Zero matches means no augmentation at all: the prompt is the raw query,
/// not an empty grounding block wrapped in instructions.
pub fn build_prompt(query: &str, matches: &[RetrievalMatch]) -> AppResult<String> {
    if matches.is_empty() {
        return Ok(query.to_string());
    }

    let mut variables = HashMap::new();
    variables.insert("documentation".to_string(), build_grounding_block(matches));
    variables.insert("question".to_string(), query.to_string());

    render_template(GROUNDED_TEMPLATE, &variables)
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Prompts are plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
