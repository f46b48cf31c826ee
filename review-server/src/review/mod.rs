//! Review generation: prompt construction and the language-model client

pub mod generator;
pub mod prompt;

pub use generator::{GenerationError, OpenAiGenerator, ReviewGenerator};
pub use prompt::{ReviewPrompt, TagCategory, VisitSummary, build_prompt, has_content};
