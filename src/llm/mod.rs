// src/llm/mod.rs
// =============================================================================
// Talking to the language model.
//
// Submodules:
// - prompt:     Renders README + structure + file dump into instructions
// - completion: Posts those instructions to a chat-completions endpoint
// =============================================================================

mod completion;
mod prompt;

pub use completion::{extract_content, CompletionClient, CompletionRequest, SamplingParams};
pub use prompt::build_prompt;
