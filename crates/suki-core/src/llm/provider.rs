//! InferenceClient trait definition.
//!
//! This is the port every inference endpoint client implements. `generate`
//! resolves once the endpoint has accepted the request and hands back the raw
//! response body as a stream of byte chunks; decoding those chunks into
//! fragments is the assembler's job, not the client's.

use std::future::Future;
use std::pin::Pin;

use futures_util::Stream;

use suki_types::llm::{GenerateRequest, LlmError, ModelInfo};

/// Raw response body: finite, non-restartable sequence of byte chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, LlmError>> + Send + 'static>>;

/// Trait for inference endpoint backends.
///
/// Implementations live in suki-infra (e.g., `OllamaClient`).
pub trait InferenceClient: Send + Sync {
    /// Human-readable backend name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send one generate request. Fails with a network-class [`LlmError`]
    /// if the endpoint is unreachable or rejects the request.
    fn generate(
        &self,
        request: GenerateRequest,
    ) -> impl Future<Output = Result<ByteStream, LlmError>> + Send;

    /// List the models installed on the endpoint.
    fn list_models(&self) -> impl Future<Output = Result<Vec<ModelInfo>, LlmError>> + Send;
}
