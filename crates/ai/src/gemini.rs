//! Direct client for the Gemini `generateContent` API.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use sublime_core::{Goal, Habit, HabitSuggestion, QuestSuggestion};
use tracing::debug;

use crate::prompt;
use crate::source::{SuggestionConfig, SuggestionError, SuggestionSource};

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

/// Calls Gemini with a JSON response schema.
#[derive(Clone)]
pub struct GeminiSuggestionClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiSuggestionClient {
    /// Create a client from the suggestion configuration.
    pub fn new(config: &SuggestionConfig) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        }
    }

    /// Generate JSON text for `prompt`, constrained by `schema`.
    async fn generate(&self, prompt: String, schema: Value) -> Result<String, SuggestionError> {
        let api_key = self.api_key.as_deref().ok_or(SuggestionError::MissingApiKey)?;

        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        debug!("Calling Gemini model {}", self.model);

        let response = self
            .client
            .post(format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::Status { status, body });
        }

        let body: GenerateResponse = response.json().await?;
        body.into_text().ok_or(SuggestionError::EmptyResponse)
    }
}

#[async_trait]
impl SuggestionSource for GeminiSuggestionClient {
    async fn try_suggest_habits(&self, goals: &[Goal]) -> Result<Vec<HabitSuggestion>, SuggestionError> {
        let text = self
            .generate(prompt::habit_prompt(goals), prompt::habit_schema())
            .await?;
        Ok(prompt::parse_habits(&text)?)
    }

    async fn try_suggest_quests(
        &self,
        goals: &[Goal],
        habits: &[Habit],
    ) -> Result<Vec<QuestSuggestion>, SuggestionError> {
        let text = self
            .generate(prompt::quest_prompt(goals, habits), prompt::quest_schema())
            .await?;
        Ok(prompt::parse_quests(&text)?)
    }
}
