//! The suggestion source abstraction and its configuration.

use std::time::Duration;

use async_trait::async_trait;
use sublime_core::{Goal, Habit, HabitSuggestion, QuestSuggestion};
use tracing::{info, warn};

use crate::gemini::GeminiSuggestionClient;
use crate::proxy::ProxySuggestionClient;

/// Errors a suggestion request can hit.
#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    /// Transport failure, including timeouts
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response
    #[error("Suggestion service responded with {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Response body was not the expected JSON
    #[error("Malformed suggestion response: {0}")]
    Json(#[from] serde_json::Error),

    /// Response carried no generated content
    #[error("Suggestion response had no content")]
    EmptyResponse,

    /// No API key configured
    #[error("No API key configured for suggestions")]
    MissingApiKey,
}

/// A generator of habit and quest suggestions.
///
/// Implementors provide the fallible `try_*` calls; the provided
/// `suggest_*` wrappers log failures and return an empty list.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Suggest habits supporting `goals`.
    async fn try_suggest_habits(&self, goals: &[Goal]) -> Result<Vec<HabitSuggestion>, SuggestionError>;

    /// Suggest one-off quests given `goals` and existing `habits`.
    async fn try_suggest_quests(
        &self,
        goals: &[Goal],
        habits: &[Habit],
    ) -> Result<Vec<QuestSuggestion>, SuggestionError>;

    /// Suggest habits, or nothing on failure.
    async fn suggest_habits(&self, goals: &[Goal]) -> Vec<HabitSuggestion> {
        match self.try_suggest_habits(goals).await {
            Ok(habits) => {
                info!("Received {} habit suggestions", habits.len());
                habits
            }
            Err(e) => {
                warn!("Failed to get habit suggestions: {}", e);
                Vec::new()
            }
        }
    }

    /// Suggest quests, or nothing on failure.
    async fn suggest_quests(&self, goals: &[Goal], habits: &[Habit]) -> Vec<QuestSuggestion> {
        match self.try_suggest_quests(goals, habits).await {
            Ok(quests) => {
                info!("Received {} quest suggestions", quests.len());
                quests
            }
            Err(e) => {
                warn!("Failed to get quest suggestions: {}", e);
                Vec::new()
            }
        }
    }
}

/// Where suggestions come from.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Proxy endpoint; when set it takes precedence over direct Gemini access
    pub endpoint: Option<String>,
    /// Gemini API key
    pub api_key: Option<String>,
    /// Gemini model name
    pub model: String,
    /// Gemini API base URL
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Pick the client a configuration describes.
pub fn build_source(config: &SuggestionConfig) -> Box<dyn SuggestionSource> {
    match &config.endpoint {
        Some(endpoint) => Box::new(ProxySuggestionClient::new(endpoint.clone(), config.timeout)),
        None => Box::new(GeminiSuggestionClient::new(config)),
    }
}
