// Skill suggestion: prompt building, response parsing, sanitization, mock data.
// All Gemini calls go through llm_client via the TextGenerator trait.

pub mod handlers;
pub mod lexicon;
pub mod mock;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod sanitizer;
pub mod service;
