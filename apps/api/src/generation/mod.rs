// Campaign generation engine.
// Implements: persona inference, insight pass, cultural trends, draft generation
// with bravery feedback, refinement passes, evaluation and post-processing.
// All LLM calls go through llm_client::TextGenerator.

pub mod evaluation;
pub mod generator;
pub mod handlers;
pub mod insights;
pub mod passes;
pub mod persona;
pub mod postprocess;
pub mod prompts;
pub mod trends;
