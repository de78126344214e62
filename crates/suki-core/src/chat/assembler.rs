//! Response assembly: one request in, one answer string out.
//!
//! The assembler prefixes the user's text with the configured instruction,
//! sends a single generate request, and concatenates the `response` field of
//! every fragment in arrival order. Malformed fragments are skipped. Any
//! network failure, or a stream that carried no text at all, yields the
//! configured fallback reply. There is no retry, timeout, or cancellation.

use futures_util::StreamExt;
use tracing::{debug, info_span, warn, Instrument};

use suki_types::config::{ChatConfig, EndpointConfig};
use suki_types::llm::{GenerateFragment, GenerateRequest, LlmError};

use crate::llm::box_provider::BoxInferenceClient;
use crate::llm::fragment::FragmentDecoder;

/// Outcome of consuming one response stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assembly {
    /// Concatenated `response` text.
    pub text: String,
    /// Fragments that parsed.
    pub fragments: u32,
    /// Lines that failed to parse and were skipped.
    pub skipped: u32,
    /// Whether some fragment carried `done: true`.
    pub done: bool,
}

impl Assembly {
    fn absorb(&mut self, outcome: Result<GenerateFragment, LlmError>) {
        match outcome {
            Ok(fragment) => {
                self.fragments += 1;
                if let Some(error) = &fragment.error {
                    warn!(error = %error, "endpoint reported an error in the stream");
                }
                if let Some(text) = fragment.response {
                    self.text.push_str(&text);
                }
                if fragment.done {
                    self.done = true;
                }
            }
            Err(e) => {
                self.skipped += 1;
                warn!(error = %e, "skipping malformed fragment");
            }
        }
    }
}

/// Turns a prompt into a complete reply string.
pub struct ResponseAssembler {
    client: BoxInferenceClient,
    model: String,
    instruction_prefix: String,
    fallback_reply: String,
}

impl ResponseAssembler {
    pub fn new(
        client: BoxInferenceClient,
        model: impl Into<String>,
        instruction_prefix: impl Into<String>,
        fallback_reply: impl Into<String>,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            instruction_prefix: instruction_prefix.into(),
            fallback_reply: fallback_reply.into(),
        }
    }

    pub fn from_config(client: BoxInferenceClient, endpoint: &EndpointConfig, chat: &ChatConfig) -> Self {
        Self::new(
            client,
            endpoint.model.clone(),
            endpoint.instruction_prefix.clone(),
            chat.fallback_reply.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn client(&self) -> &BoxInferenceClient {
        &self.client
    }

    pub fn fallback_reply(&self) -> &str {
        &self.fallback_reply
    }

    /// The wire request for a raw user prompt.
    pub fn build_request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: format!("{}{}", self.instruction_prefix, prompt),
        }
    }

    /// Consume the whole response stream, surfacing network failures.
    ///
    /// Per-fragment protocol errors never surface here; they are counted in
    /// [`Assembly::skipped`].
    pub async fn try_assemble(&self, prompt: &str) -> Result<Assembly, LlmError> {
        let request = self.build_request(prompt);
        let mut body = self.client.generate(request).await?;

        let mut decoder = FragmentDecoder::new();
        let mut assembly = Assembly::default();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for outcome in decoder.push(&chunk) {
                assembly.absorb(outcome);
            }
        }
        if let Some(outcome) = decoder.finish() {
            assembly.absorb(outcome);
        }

        debug!(
            fragments = assembly.fragments,
            skipped = assembly.skipped,
            done = assembly.done,
            chars = assembly.text.chars().count(),
            "response stream closed"
        );
        Ok(assembly)
    }

    /// Best-effort reply: the assembled text, or the fallback reply.
    pub async fn assemble(&self, prompt: &str) -> String {
        let span = info_span!(
            "gen_ai.generate",
            gen_ai.operation.name = "text_completion",
            gen_ai.provider.name = self.client.name(),
            gen_ai.request.model = %self.model,
        );
        match self.try_assemble(prompt).instrument(span).await {
            Ok(assembly) if !assembly.text.is_empty() => assembly.text,
            Ok(assembly) => {
                warn!(
                    fragments = assembly.fragments,
                    skipped = assembly.skipped,
                    "stream carried no response text, using fallback reply"
                );
                self.fallback_reply.clone()
            }
            Err(e) => {
                warn!(error = %e, "inference request failed, using fallback reply");
                self.fallback_reply.clone()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::llm::provider::{ByteStream, InferenceClient};
    use std::future::Future;
    use std::sync::{Arc, Mutex};
    use suki_types::llm::ModelInfo;

    pub(crate) const FALLBACK: &str = "🤔 No pude generar respuesta.";

    /// Replays canned chunks, or fails the request outright.
    pub(crate) struct ScriptedClient {
        chunks: Vec<Result<Vec<u8>, LlmError>>,
        request_error: Option<LlmError>,
        pub(crate) requests: Arc<Mutex<Vec<GenerateRequest>>>,
    }

    impl ScriptedClient {
        pub(crate) fn lines(lines: &[&str]) -> Self {
            let body: String = lines.iter().map(|l| format!("{l}\n")).collect();
            Self::chunks(vec![Ok(body.into_bytes())])
        }

        pub(crate) fn chunks(chunks: Vec<Result<Vec<u8>, LlmError>>) -> Self {
            Self {
                chunks,
                request_error: None,
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(crate) fn unreachable() -> Self {
            Self {
                chunks: Vec::new(),
                request_error: Some(LlmError::Network("connection refused".to_string())),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl InferenceClient for ScriptedClient {
        fn name(&self) -> &str {
            "scripted"
        }

        fn generate(
            &self,
            request: GenerateRequest,
        ) -> impl Future<Output = Result<ByteStream, LlmError>> + Send {
            self.requests.lock().unwrap().push(request);
            let chunks = self.chunks.clone();
            let error = self.request_error.clone();
            async move {
                if let Some(error) = error {
                    return Err(error);
                }
                let stream: ByteStream = Box::pin(async_stream::stream! {
                    for chunk in chunks {
                        yield chunk;
                    }
                });
                Ok(stream)
            }
        }

        fn list_models(&self) -> impl Future<Output = Result<Vec<ModelInfo>, LlmError>> + Send {
            async { Ok(Vec::new()) }
        }
    }

    pub(crate) fn assembler(client: ScriptedClient) -> ResponseAssembler {
        ResponseAssembler::new(
            BoxInferenceClient::new(client),
            "llama2",
            "Responde en español: ",
            FALLBACK,
        )
    }

    #[tokio::test]
    async fn test_concatenates_responses_in_order() {
        let client = ScriptedClient::lines(&[
            r#"{"response":"Ho","done":false}"#,
            r#"{"response":"l","done":false}"#,
            r#"{"response":"a","done":false}"#,
            r#"{"response":"","done":true}"#,
        ]);
        let assembly = assembler(client).try_assemble("hola").await.unwrap();
        assert_eq!(assembly.text, "Hola");
        assert_eq!(assembly.fragments, 4);
        assert_eq!(assembly.skipped, 0);
        assert!(assembly.done);
    }

    #[tokio::test]
    async fn test_request_carries_prefix_and_model() {
        let client = ScriptedClient::lines(&[r#"{"response":"ok"}"#]);
        let requests = client.requests.clone();
        assembler(client).assemble("¿qué tal?").await;

        let sent = requests.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, "llama2");
        assert_eq!(sent[0].prompt, "Responde en español: ¿qué tal?");
    }

    #[tokio::test]
    async fn test_no_response_field_yields_fallback() {
        let client = ScriptedClient::lines(&[r#"{"done":false}"#, r#"{"done":true}"#]);
        assert_eq!(assembler(client).assemble("hola").await, FALLBACK);
    }

    #[tokio::test]
    async fn test_empty_body_yields_fallback() {
        let client = ScriptedClient::chunks(Vec::new());
        assert_eq!(assembler(client).assemble("hola").await, FALLBACK);
    }

    #[tokio::test]
    async fn test_malformed_line_between_good_fragments() {
        let client = ScriptedClient::lines(&[
            r#"{"response":"Buenos "}"#,
            r#"{"response": oops"#,
            r#"{"response":"días"}"#,
        ]);
        let assembler = assembler(client);
        let assembly = assembler.try_assemble("hola").await.unwrap();
        assert_eq!(assembly.text, "Buenos días");
        assert_eq!(assembly.skipped, 1);
    }

    #[tokio::test]
    async fn test_fragments_split_across_chunks() {
        let client = ScriptedClient::chunks(vec![
            Ok(b"{\"response\":\"Ho".to_vec()),
            Ok(b"la\"}\n{\"resp".to_vec()),
            Ok(b"onse\":\" mundo\"}".to_vec()),
        ]);
        assert_eq!(assembler(client).assemble("x").await, "Hola mundo");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_yields_fallback() {
        let assembler = assembler(ScriptedClient::unreachable());
        assert!(matches!(
            assembler.try_assemble("hola").await,
            Err(LlmError::Network(_))
        ));
        assert_eq!(assembler.assemble("hola").await, FALLBACK);
    }

    #[tokio::test]
    async fn test_broken_stream_yields_fallback() {
        let client = ScriptedClient::chunks(vec![
            Ok(b"{\"response\":\"parcial\"}\n".to_vec()),
            Err(LlmError::Network("connection reset".to_string())),
        ]);
        assert_eq!(assembler(client).assemble("hola").await, FALLBACK);
    }

    #[tokio::test]
    async fn test_error_fragment_is_not_text() {
        let client = ScriptedClient::lines(&[r#"{"error":"model 'llama2' not found"}"#]);
        let assembler = assembler(client);
        let assembly = assembler.try_assemble("hola").await.unwrap();
        assert!(assembly.text.is_empty());
        assert_eq!(assembly.fragments, 1);
        assert_eq!(assembler.assemble("hola").await, FALLBACK);
    }
}
