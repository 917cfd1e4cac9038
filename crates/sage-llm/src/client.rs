//! Streaming client for an OpenAI-compatible chat-completion API.

use crate::config::LlmConfig;
use crate::error::LlmError;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use sage_types::ChatMessage;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Buffered tokens between the pump task and the consumer.
const TOKEN_CHANNEL_CAPACITY: usize = 64;

/// Sentinel data line terminating an OpenAI SSE stream.
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl ChatClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Starts a streaming completion for `messages`.
    ///
    /// Returns a receiver of content deltas in arrival order. The stream ends
    /// when the API sends its done sentinel; transport or API errors arrive
    /// as a final `Err` item.
    pub async fn stream_completion(
        &self,
        messages: &[ChatMessage],
    ) -> Result<mpsc::Receiver<Result<String, LlmError>>, LlmError> {
        if self.config.api_key.is_empty() {
            return Err(LlmError::Config("llm.api_key is not set".to_string()));
        }

        let body = json!({
            "model": self.config.model,
            "messages": messages,
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
            "stream": true,
        });

        let url = format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!(
                "completion request failed with {status}: {detail}"
            )));
        }

        let (tx, rx) = mpsc::channel(TOKEN_CHANNEL_CAPACITY);
        let idle_timeout = Duration::from_secs(self.config.stream_idle_timeout_seconds);
        tokio::spawn(pump_stream(response, tx, idle_timeout));

        Ok(rx)
    }
}

/// Drives the SSE stream, forwarding content deltas until the done sentinel.
async fn pump_stream(
    response: reqwest::Response,
    tx: mpsc::Sender<Result<String, LlmError>>,
    idle_timeout: Duration,
) {
    let mut stream = response.bytes_stream().eventsource();

    loop {
        let event = match timeout(idle_timeout, stream.next()).await {
            Ok(Some(Ok(event))) => event,
            Ok(Some(Err(e))) => {
                let _ = tx.send(Err(LlmError::Stream(e.to_string()))).await;
                return;
            }
            Ok(None) => {
                // Stream closed without [DONE]; treat whatever arrived as the
                // full reply rather than discarding it.
                tracing::warn!("completion stream closed before done sentinel");
                return;
            }
            Err(_) => {
                let _ = tx
                    .send(Err(LlmError::StreamTimeout(idle_timeout.as_secs())))
                    .await;
                return;
            }
        };

        if event.data == DONE_SENTINEL {
            return;
        }

        let chunk: Value = match serde_json::from_str(&event.data) {
            Ok(value) => value,
            Err(e) => {
                let _ = tx
                    .send(Err(LlmError::Stream(format!(
                        "unparseable SSE chunk: {e}"
                    ))))
                    .await;
                return;
            }
        };

        if let Some(message) = extract_api_error(&chunk) {
            let _ = tx.send(Err(LlmError::Api(message))).await;
            return;
        }

        match extract_delta(&chunk) {
            Some(token) if !token.is_empty() => {
                if tx.send(Ok(token)).await.is_err() {
                    // Consumer went away; stop pulling from the API.
                    return;
                }
            }
            // Keepalive / role-only / finish chunks carry no content.
            _ => {}
        }
    }
}

/// Pulls the error message out of an error payload, if the chunk is one.
fn extract_api_error(chunk: &Value) -> Option<String> {
    let error = chunk.get("error")?;
    if let Some(message) = error.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }
    if let Some(message) = error.as_str() {
        return Some(message.to_string());
    }
    Some("unspecified streaming error".to_string())
}

/// Extracts the content delta from a `chat.completion.chunk` payload.
fn extract_delta(chunk: &Value) -> Option<String> {
    chunk
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_content_delta_from_chunk() {
        let chunk = json!({
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {"content": "Hel"}}]
        });
        assert_eq!(extract_delta(&chunk).as_deref(), Some("Hel"));
    }

    #[test]
    fn role_only_delta_has_no_content() {
        let chunk = json!({
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {"role": "assistant"}}]
        });
        assert_eq!(extract_delta(&chunk), None);
    }

    #[test]
    fn finish_chunk_has_no_content() {
        let chunk = json!({
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {}, "finish_reason": "stop"}]
        });
        assert_eq!(extract_delta(&chunk), None);
    }

    #[test]
    fn empty_choices_has_no_content() {
        let chunk = json!({"object": "chat.completion.chunk", "choices": []});
        assert_eq!(extract_delta(&chunk), None);
    }

    #[test]
    fn extracts_error_message_from_object_shape() {
        let chunk = json!({"error": {"message": "rate limited"}});
        assert_eq!(extract_api_error(&chunk).as_deref(), Some("rate limited"));
    }

    #[test]
    fn extracts_error_message_from_string_shape() {
        let chunk = json!({"error": "provider down"});
        assert_eq!(extract_api_error(&chunk).as_deref(), Some("provider down"));
    }

    #[test]
    fn no_error_field_returns_none() {
        let chunk = json!({"object": "chat.completion.chunk", "choices": []});
        assert!(extract_api_error(&chunk).is_none());
    }

    #[tokio::test]
    async fn missing_api_key_is_rejected_before_any_request() {
        let client = ChatClient::new(LlmConfig::default());
        let result = client.stream_completion(&[]).await;
        assert!(matches!(result, Err(LlmError::Config(_))));
    }
}
