//! Inference endpoint wire types for Suki.
//!
//! These model the Ollama-style `/api/generate` exchange: a JSON request body,
//! a response body of newline-delimited JSON fragments, and the model listing
//! returned by `/api/tags`.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
}

/// One newline-delimited JSON object from a streamed generate response.
///
/// Every field is optional on the wire. Only `response` contributes to the
/// assembled answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateFragment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// A model installed on the inference endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Response body of `GET /api/tags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}

/// Errors from talking to the inference endpoint.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    /// Endpoint unreachable, request failed, or the body stream broke.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// A stream line could not be parsed as a fragment.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl LlmError {
    /// Whether this error belongs to the network class (as opposed to a
    /// per-fragment protocol failure).
    pub fn is_network(&self) -> bool {
        matches!(self, LlmError::Network(_) | LlmError::Status { .. })
    }
}
