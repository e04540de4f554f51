//! Gemini API HTTP Client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::GeminiConfig;
use crate::error::{Error, Result};

use super::AiGateway;
use super::types::{GenerateContentRequest, GenerateContentResponse};

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(Error::Http)?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create with custom base URL (for testing or custom endpoints)
    pub fn with_base_url(config: &GeminiConfig, base_url: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(client)
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl AiGateway for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint();

        debug!("Sending request to Gemini API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::user(prompt))
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::Http)?;

        if !status.is_success() {
            warn!("Gemini API error: {} - {}", status, body);
            return Err(Error::GeminiApi {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        let text = parsed.text().ok_or(Error::EmptyResponse)?;

        info!(
            model = %self.model,
            finish_reason = ?parsed.candidates.first().and_then(|c| c.finish_reason.as_deref()),
            chars = text.chars().count(),
            "Gemini API response"
        );

        Ok(text)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config() -> GeminiConfig {
        GeminiConfig::new("test-key")
    }

    async fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::with_base_url(&config(), server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "Hello"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "Hi there!"}]},
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let reply = client.generate("Hello").await.unwrap();
        assert_eq!(reply, "Hi there!");
    }

    #[tokio::test]
    async fn test_generate_passes_empty_prompt_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": ""}]}]
            })))
            .respond_with(ResponseTemplate::new(400).set_body_string("empty prompt"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.generate("").await.unwrap_err();
        assert!(matches!(err, Error::GeminiApi { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        match client.generate("Hello").await {
            Err(Error::GeminiApi { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key not valid");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_without_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.generate("Hello").await.unwrap_err();
        assert!(matches!(err, Error::EmptyResponse));
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.generate("Hello").await.unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_custom_model_in_endpoint() {
        let mut config = config();
        config.model = "gemini-2.5-pro".to_string();
        let client = GeminiClient::with_base_url(&config, "http://localhost:1234/v1beta/").unwrap();

        assert_eq!(client.model(), "gemini-2.5-pro");
        assert_eq!(
            client.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }
}
