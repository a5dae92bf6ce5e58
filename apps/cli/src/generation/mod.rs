// Content generation: prompt assembly, response parsing, profile building.
// All model calls go through llm_client — nothing in here talks to the provider.

pub mod defaults;
pub mod parser;
pub mod profile;
pub mod prompts;
