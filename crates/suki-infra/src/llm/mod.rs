//! Inference client implementations.
//!
//! [`create_client`] builds the configured client behind a
//! [`BoxInferenceClient`]; [`probe_endpoint`] checks that the endpoint is
//! reachable and reports whether the configured model is installed.

pub mod ollama;

use tracing::debug;

use suki_core::llm::box_provider::BoxInferenceClient;
use suki_types::config::EndpointConfig;
use suki_types::llm::{LlmError, ModelInfo};

use self::ollama::OllamaClient;

/// Create a [`BoxInferenceClient`] for the configured endpoint.
pub fn create_client(config: &EndpointConfig) -> Result<BoxInferenceClient, LlmError> {
    let client = OllamaClient::new(config.base_url.clone())?;
    debug!(base_url = %config.base_url, "created inference client");
    Ok(BoxInferenceClient::new(client))
}

/// Outcome of [`probe_endpoint`].
#[derive(Debug, Clone)]
pub struct EndpointStatus {
    pub models: Vec<ModelInfo>,
    /// Whether `model` (with or without a `:tag`) is among `models`.
    pub model_installed: bool,
}

/// List the endpoint's models and look for `model` among them.
pub async fn probe_endpoint(
    client: &BoxInferenceClient,
    model: &str,
) -> Result<EndpointStatus, LlmError> {
    let models = client.list_models().await?;
    let model_installed = models.iter().any(|m| model_matches(&m.name, model));
    Ok(EndpointStatus {
        models,
        model_installed,
    })
}

/// `llama2` matches `llama2:latest`; an explicit tag must match exactly.
fn model_matches(installed: &str, wanted: &str) -> bool {
    if installed == wanted {
        return true;
    }
    !wanted.contains(':') && installed.split_once(':').is_some_and(|(base, _)| base == wanted)
}
