//! Suggestion providers
//!
//! Best-effort generators of new habits and quests. Any failure degrades
//! to an empty suggestion list.

#![warn(missing_docs)]

pub mod source;
pub mod prompt;
pub mod proxy;
pub mod gemini;

pub use source::{build_source, SuggestionConfig, SuggestionError, SuggestionSource};
pub use proxy::ProxySuggestionClient;
pub use gemini::GeminiSuggestionClient;
