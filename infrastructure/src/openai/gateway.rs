//! OpenAI-compatible implementation of the [`LlmGateway`] port.

use super::error::{OpenAiError, Result};
use super::protocol::{ChatRequest, ChatResponse, ModelsResponse, WireMessage, function_tools};
use async_trait::async_trait;
use explainer_application::ports::llm_gateway::{GatewayError, LlmGateway};
use explainer_domain::{LlmResponse, Message, Model};
use std::time::Duration;
use tracing::{debug, trace};

/// Base URL used when neither configuration nor environment names one
/// (a local Ollama server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";

/// Connection settings for a chat completions backend
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    /// Sent as a bearer token when present; Ollama needs none
    pub api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(600),
        }
    }
}

impl ProviderSettings {
    /// Pick the base URL: explicit value first, then the named environment
    /// variable, then [`DEFAULT_BASE_URL`]. Blank values are skipped.
    pub fn resolve_base_url(explicit: Option<&str>, env_var: &str) -> String {
        explicit
            .map(str::to_string)
            .filter(|s| !s.trim().is_empty())
            .or_else(|| std::env::var(env_var).ok().filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}

/// `{base}/v1/{path}`, without doubling `/v1` when the base already ends
/// with it.
pub fn endpoint(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/v1") {
        format!("{}/{}", base, path)
    } else {
        format!("{}/v1/{}", base, path)
    }
}

/// Stateless chat completions client.
pub struct OpenAiLlmGateway {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl OpenAiLlmGateway {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.settings.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn chat(
        &self,
        model: &Model,
        messages: &[Message],
        tools: &[serde_json::Value],
    ) -> Result<LlmResponse> {
        let url = endpoint(&self.settings.base_url, "chat/completions");
        let request = ChatRequest {
            model: model.as_str(),
            messages: messages.iter().map(WireMessage::from).collect(),
            tools: function_tools(tools),
            stream: false,
        };

        debug!(
            "POST {} (model {}, {} messages, {} tools)",
            url,
            model,
            messages.len(),
            request.tools.len()
        );
        if let Ok(body) = serde_json::to_string_pretty(&request) {
            trace!("Request body: {}", body);
        }

        let response = self
            .authorized(self.client.post(&url))
            .json(&request)
            .send()
            .await?;
        let raw = read_body(response).await?;
        trace!("Response body: {}", raw);

        let parsed: ChatResponse = serde_json::from_str(&raw).map_err(|e| OpenAiError::Parse {
            error: e.to_string(),
            raw: raw.clone(),
        })?;
        parsed.into_llm_response()
    }

    async fn models(&self) -> Result<Vec<Model>> {
        let url = endpoint(&self.settings.base_url, "models");
        debug!("GET {}", url);

        let response = self.authorized(self.client.get(&url)).send().await?;
        let raw = read_body(response).await?;
        let parsed: ModelsResponse = serde_json::from_str(&raw).map_err(|e| OpenAiError::Parse {
            error: e.to_string(),
            raw: raw.clone(),
        })?;

        Ok(parsed
            .data
            .into_iter()
            .map(|entry| Model::from(entry.id.as_str()))
            .collect())
    }
}

/// Read the body, turning non-2xx statuses into [`OpenAiError::Status`].
async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(OpenAiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

#[async_trait]
impl LlmGateway for OpenAiLlmGateway {
    async fn send_with_tools(
        &self,
        model: &Model,
        messages: &[Message],
        tools: &[serde_json::Value],
    ) -> std::result::Result<LlmResponse, GatewayError> {
        self.chat(model, messages, tools)
            .await
            .map_err(GatewayError::from)
    }

    async fn available_models(&self) -> std::result::Result<Vec<Model>, GatewayError> {
        self.models().await.map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        assert_eq!(
            endpoint("http://localhost:11434", "chat/completions"),
            "http://localhost:11434/v1/chat/completions"
        );
        assert_eq!(
            endpoint("http://localhost:11434/v1/", "chat/completions"),
            "http://localhost:11434/v1/chat/completions"
        );
        assert_eq!(
            endpoint("https://api.openai.com/v1", "models"),
            "https://api.openai.com/v1/models"
        );
    }

    #[test]
    fn test_resolve_base_url_prefers_explicit() {
        assert_eq!(
            ProviderSettings::resolve_base_url(
                Some("http://gpu-box:8000"),
                "CLI_EXPLAINER_TEST_UNSET_VAR"
            ),
            "http://gpu-box:8000"
        );
        assert_eq!(
            ProviderSettings::resolve_base_url(Some("  "), "CLI_EXPLAINER_TEST_UNSET_VAR"),
            DEFAULT_BASE_URL
        );
        assert_eq!(
            ProviderSettings::resolve_base_url(None, "CLI_EXPLAINER_TEST_UNSET_VAR"),
            DEFAULT_BASE_URL
        );
    }

    #[tokio::test]
    async fn test_unreachable_base_is_connection_error() {
        let gateway = OpenAiLlmGateway::new(ProviderSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: Some("test-key".to_string()),
            request_timeout: Duration::from_secs(5),
        })
        .unwrap();

        let result = gateway
            .send_with_tools(&Model::default(), &[Message::user("hello")], &[])
            .await;

        assert!(matches!(
            result,
            Err(GatewayError::ConnectionError(_)) | Err(GatewayError::Timeout)
        ));
    }
}
