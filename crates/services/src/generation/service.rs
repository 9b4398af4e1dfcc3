use reqwest::Client;
use scenario_core::model::{ScenarioCategory, ScenarioDraft};
use scenario_core::templates;
use scenario_core::wire::{GenerateScenarioRequest, GenerateScenarioResponse};

use super::remote::RemoteConfig;
use crate::error::GenerationError;

/// Produces scenario drafts: one remote attempt, then the local templates.
#[derive(Clone)]
pub struct ScenarioGenerationService {
    client: Client,
    config: Option<RemoteConfig>,
}

impl ScenarioGenerationService {
    #[must_use]
    pub fn new(config: Option<RemoteConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Service that never touches the network.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn remote_enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Generate a draft with `count` questions for `category`.
    ///
    /// Never fails: any remote failure is logged and answered from the local templates.
    pub async fn generate(&self, category: ScenarioCategory, count: usize) -> ScenarioDraft {
        self.attempt_remote(category, count)
            .await
            .unwrap_or_else(|err| {
                match err {
                    GenerationError::Disabled => {
                        tracing::debug!(
                            %category,
                            count,
                            "remote generation disabled, using templates"
                        );
                    }
                    err => {
                        tracing::warn!(
                            %category,
                            count,
                            error = %err,
                            "scenario generation failed, falling back to templates"
                        );
                    }
                }
                Self::generate_local(category, count)
            })
    }

    /// Single request to the remote endpoint, no retries.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when remote generation is not configured, the
    /// request fails, the status is not a success, or the body cannot be decoded.
    pub async fn attempt_remote(
        &self,
        category: ScenarioCategory,
        count: usize,
    ) -> Result<ScenarioDraft, GenerationError> {
        let config = self.config.as_ref().ok_or(GenerationError::Disabled)?;

        let mut request = self
            .client
            .post(config.endpoint())
            .json(&GenerateScenarioRequest::new(category.key(), count));
        if let Some(timeout) = config.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: GenerateScenarioResponse = response.json().await?;
        Ok(body.into())
    }

    /// Deterministic draft from the static templates.
    #[must_use]
    pub fn generate_local(category: ScenarioCategory, count: usize) -> ScenarioDraft {
        templates::local_draft(category, count)
    }
}
