use async_trait::async_trait;
use serde_json::Value;

use crate::config::GenerationConfig;
use crate::error::{GenerationError, GenerationResult};

/// One request/response exchange with the generation service.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// POST `body` to capability `capability` and return the decoded JSON
    /// response.
    async fn post(&self, capability: &str, body: Value) -> GenerationResult<Value>;
}

#[async_trait]
impl<T: GenerationTransport + ?Sized> GenerationTransport for std::sync::Arc<T> {
    async fn post(&self, capability: &str, body: Value) -> GenerationResult<Value> {
        (**self).post(capability, body).await
    }
}

/// JSON over HTTP via `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl HttpTransport {
    pub fn new(config: GenerationConfig) -> GenerationResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::InvalidConfig(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn post(&self, capability: &str, body: Value) -> GenerationResult<Value> {
        let url = self.config.endpoint(capability);
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Service {
                status: status.as_u16(),
                message: error_message(&text)
                    .or_else(|| status.canonical_reason().map(str::to_string))
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        resp.json::<Value>()
            .await
            .map_err(|e| GenerationError::UnusableOutput(e.to_string()))
    }
}

/// `message` of a JSON error body, if there is one.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"message":"quota exceeded"}"#).as_deref(),
            Some("quota exceeded")
        );
        assert_eq!(error_message("<html>502</html>"), None);
        assert_eq!(error_message(r#"{"message":""}"#), None);
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let config = GenerationConfig {
            timeout: std::time::Duration::from_millis(200),
            ..GenerationConfig::new("http://127.0.0.1:9").unwrap()
        };
        let transport = HttpTransport::new(config).unwrap();

        let err = transport.post("suggestion", serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }
}
