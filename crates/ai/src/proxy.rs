//! Client for a suggestion proxy that holds the Gemini key server-side.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Serialize;
use sublime_core::{Goal, Habit, HabitSuggestion, QuestSuggestion};
use tracing::debug;

use crate::prompt::{HabitsEnvelope, QuestsEnvelope};
use crate::source::{SuggestionError, SuggestionSource};

#[derive(Serialize)]
struct ProxyRequest<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    goals: &'a [Goal],
    #[serde(skip_serializing_if = "Option::is_none")]
    habits: Option<&'a [Habit]>,
}

/// Posts `{type, goals, habits?}` to a proxy endpoint.
#[derive(Clone)]
pub struct ProxySuggestionClient {
    client: Client,
    endpoint: String,
}

impl ProxySuggestionClient {
    /// Create a client for `endpoint`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: ClientBuilder::new()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, request: &ProxyRequest<'_>) -> Result<String, SuggestionError> {
        debug!("Requesting {} suggestions from {}", request.kind, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::Status { status, body });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl SuggestionSource for ProxySuggestionClient {
    async fn try_suggest_habits(&self, goals: &[Goal]) -> Result<Vec<HabitSuggestion>, SuggestionError> {
        let body = self
            .post(&ProxyRequest { kind: "habits", goals, habits: None })
            .await?;
        Ok(serde_json::from_str::<HabitsEnvelope>(&body)?.habits)
    }

    async fn try_suggest_quests(
        &self,
        goals: &[Goal],
        habits: &[Habit],
    ) -> Result<Vec<QuestSuggestion>, SuggestionError> {
        let body = self
            .post(&ProxyRequest { kind: "quests", goals, habits: Some(habits) })
            .await?;
        Ok(serde_json::from_str::<QuestsEnvelope>(&body)?.quests)
    }
}
