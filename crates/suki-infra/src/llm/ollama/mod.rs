//! OllamaClient -- concrete [`InferenceClient`] for an Ollama-style endpoint.
//!
//! `POST /api/generate` with `{ model, prompt }` answers with a body of
//! newline-delimited JSON fragments, which this client hands back untouched
//! as a byte stream. `GET /api/tags` lists installed models.
//!
//! No request timeout is configured: a generation runs until the endpoint
//! closes the stream.

use futures_util::StreamExt;
use tracing::debug;

use suki_core::llm::provider::{ByteStream, InferenceClient};
use suki_types::llm::{GenerateRequest, LlmError, ModelInfo, ModelList};

/// HTTP client for a local Ollama server.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for `base_url` (e.g., "http://localhost:11434").
    pub fn new(base_url: impl Into<String>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(LlmError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl InferenceClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<ByteStream, LlmError> {
        let url = self.url("/api/generate");
        debug!(url = %url, model = %request.model, "sending generate request");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network(format!("HTTP request failed: {e}")))?;

        let response = Self::check_status(response).await?;

        let body = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| LlmError::Network(format!("response body interrupted: {e}")))
        });
        Ok(Box::pin(body))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(|e| LlmError::Network(format!("HTTP request failed: {e}")))?;

        let response = Self::check_status(response).await?;
        let list: ModelList = response
            .json()
            .await
            .map_err(|e| LlmError::Protocol(format!("failed to parse model list: {e}")))?;
        Ok(list.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP exchange; resolves to the raw request text.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/x-ndjson\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (base_url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    async fn collect(mut body: ByteStream) -> String {
        let mut out = Vec::new();
        while let Some(chunk) = body.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_generate_posts_request_and_streams_body() {
        let body = "{\"response\":\"Ho\"}\n{\"response\":\"la\",\"done\":true}\n";
        let (base_url, server) = serve_once("200 OK", body).await;
        let client = OllamaClient::new(base_url).unwrap();

        let stream = client
            .generate(GenerateRequest {
                model: "llama2".to_string(),
                prompt: "Responde en español: hola".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(collect(stream).await, body);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/generate HTTP/1.1"));
        let json_start = request.find("\r\n\r\n").unwrap() + 4;
        let sent: serde_json::Value = serde_json::from_str(&request[json_start..]).unwrap();
        assert_eq!(sent["model"], "llama2");
        assert_eq!(sent["prompt"], "Responde en español: hola");
    }

    #[tokio::test]
    async fn test_generate_non_success_status() {
        let (base_url, _server) =
            serve_once("404 Not Found", "{\"error\":\"model 'llama2' not found\"}").await;
        let client = OllamaClient::new(base_url).unwrap();

        let result = client
            .generate(GenerateRequest {
                model: "llama2".to_string(),
                prompt: "hola".to_string(),
            })
            .await;
        match result {
            Err(LlmError::Status { status, body }) => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            Err(other) => panic!("expected Status error, got: {other}"),
            Ok(_) => panic!("expected error but got Ok"),
        }
    }

    #[tokio::test]
    async fn test_generate_unreachable_is_network_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OllamaClient::new(format!("http://{addr}")).unwrap();
        let result = client
            .generate(GenerateRequest {
                model: "llama2".to_string(),
                prompt: "hola".to_string(),
            })
            .await;
        assert!(matches!(result, Err(LlmError::Network(_))));
    }

    #[tokio::test]
    async fn test_list_models() {
        let (base_url, server) = serve_once(
            "200 OK",
            "{\"models\":[{\"name\":\"llama2:latest\",\"size\":3826793677}]}",
        )
        .await;
        let client = OllamaClient::new(base_url).unwrap();

        let models = client.list_models().await.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "llama2:latest");
        assert!(server.await.unwrap().starts_with("GET /api/tags HTTP/1.1"));
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = OllamaClient::new("http://localhost:11434/").unwrap();
        assert_eq!(client.url("/api/generate"), "http://localhost:11434/api/generate");
        assert_eq!(client.name(), "ollama");
    }
}
