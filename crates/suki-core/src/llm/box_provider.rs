//! BoxInferenceClient -- object-safe dynamic dispatch wrapper for InferenceClient.
//!
//! 1. Define an object-safe `InferenceClientDyn` trait with boxed futures
//! 2. Blanket-impl `InferenceClientDyn` for all `T: InferenceClient`
//! 3. `BoxInferenceClient` wraps `Box<dyn InferenceClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use suki_types::llm::{GenerateRequest, LlmError, ModelInfo};

use super::provider::{ByteStream, InferenceClient};

/// Object-safe version of [`InferenceClient`] with boxed futures.
pub trait InferenceClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn generate_boxed<'a>(
        &'a self,
        request: GenerateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ByteStream, LlmError>> + Send + 'a>>;

    fn list_models_boxed<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ModelInfo>, LlmError>> + Send + 'a>>;
}

impl<T: InferenceClient> InferenceClientDyn for T {
    fn name(&self) -> &str {
        InferenceClient::name(self)
    }

    fn generate_boxed<'a>(
        &'a self,
        request: GenerateRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ByteStream, LlmError>> + Send + 'a>> {
        Box::pin(self.generate(request))
    }

    fn list_models_boxed<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ModelInfo>, LlmError>> + Send + 'a>> {
        Box::pin(self.list_models())
    }
}

/// Type-erased inference client.
///
/// `InferenceClient` uses RPITIT and cannot be a trait object directly;
/// this wrapper offers the same methods over `dyn InferenceClientDyn`.
pub struct BoxInferenceClient {
    inner: Box<dyn InferenceClientDyn + Send + Sync>,
}

impl BoxInferenceClient {
    pub fn new<T: InferenceClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn generate(&self, request: GenerateRequest) -> Result<ByteStream, LlmError> {
        self.inner.generate_boxed(request).await
    }

    pub async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        self.inner.list_models_boxed().await
    }
}
