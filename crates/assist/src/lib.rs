//! # HMS Assist
//!
//! Client for the AI-suggestion collaborator. It sends a rendered vitals summary to an
//! OpenAI-compatible chat-completions endpoint and returns the model's free-text reply.
//!
//! Nothing here parses or acts on the reply; it is shown to the clinician as-is.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// System instruction sent ahead of every vitals summary.
pub const SYSTEM_PROMPT: &str = "You are a medical assistant. Analyze the provided patient vitals and generate a concise summary. Highlight any abnormal vitals or red flags.";

pub const DEFAULT_MODEL: &str = "gpt-5-nano";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("invalid assist configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("AI request failed: {0}")]
    Request(reqwest::Error),
    #[error("AI service returned status {0}")]
    Status(u16),
    #[error("failed to decode AI response: {0}")]
    Decode(reqwest::Error),
    #[error("AI service returned no summary")]
    EmptyResponse,
}

pub type AssistResult<T> = std::result::Result<T, AssistError>;

/// Connection settings for the chat-completions endpoint, resolved at startup.
#[derive(Clone, Debug)]
pub struct AssistConfig {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl AssistConfig {
    /// `endpoint` is the full chat-completions URL. A blank `api_key` sends no `Authorization`.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> AssistResult<Self> {
        let endpoint = endpoint.into().trim().to_string();
        let model = model.into().trim().to_string();

        if endpoint.is_empty() {
            return Err(AssistError::InvalidConfig("endpoint cannot be empty".into()));
        }
        if model.is_empty() {
            return Err(AssistError::InvalidConfig("model cannot be empty".into()));
        }
        if timeout_secs == 0 {
            return Err(AssistError::InvalidConfig(
                "timeout must be at least one second".into(),
            ));
        }

        Ok(Self {
            endpoint,
            model,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone, Debug)]
pub struct AssistClient {
    http: reqwest::Client,
    config: AssistConfig,
}

impl AssistClient {
    pub fn new(config: AssistConfig) -> AssistResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AssistError::ClientBuild)?;
        Ok(Self { http, config })
    }

    /// Sends `prompt` with [`SYSTEM_PROMPT`] and returns the first choice's trimmed content.
    pub async fn summarise(&self, prompt: &str) -> AssistResult<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut request = self.http.post(&self.config.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(AssistError::Request)?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "AI summary request rejected");
            return Err(AssistError::Status(status.as_u16()));
        }

        let reply: ChatResponse = response.json().await.map_err(AssistError::Decode)?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            tracing::warn!("AI summary response had no content");
            return Err(AssistError::EmptyResponse);
        }

        tracing::debug!(chars = content.len(), "AI summary received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, api_key: Option<&str>) -> AssistClient {
        let config = AssistConfig::new(
            format!("{}/v1/chat/completions", server.uri()),
            DEFAULT_MODEL,
            api_key.map(str::to_string),
            5,
        )
        .unwrap();
        AssistClient::new(config).unwrap()
    }

    #[test]
    fn config_rejects_blank_endpoint_model_and_zero_timeout() {
        assert!(matches!(
            AssistConfig::new(" ", "m", None, 5),
            Err(AssistError::InvalidConfig(msg)) if msg.contains("endpoint")
        ));
        assert!(matches!(
            AssistConfig::new("http://x", "", None, 5),
            Err(AssistError::InvalidConfig(msg)) if msg.contains("model")
        ));
        assert!(matches!(
            AssistConfig::new("http://x", "m", None, 0),
            Err(AssistError::InvalidConfig(msg)) if msg.contains("timeout")
        ));
    }

    #[tokio::test]
    async fn summarise_sends_system_and_user_messages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-5-nano",
                "messages": [
                    {"role": "system", "content": SYSTEM_PROMPT},
                    {"role": "user", "content": "Pulse: 130 bpm"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  Tachycardia noted.\n"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summary = client(&server, Some("sk-test"))
            .summarise("Pulse: 130 bpm")
            .await
            .unwrap();
        assert_eq!(summary, "Tachycardia noted.");
    }

    #[tokio::test]
    async fn empty_content_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "   "}}]
            })))
            .mount(&server)
            .await;

        let err = client(&server, None).summarise("x").await.unwrap_err();
        assert!(matches!(err, AssistError::EmptyResponse));
    }

    #[tokio::test]
    async fn missing_choices_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = client(&server, None).summarise("x").await.unwrap_err();
        assert!(matches!(err, AssistError::EmptyResponse));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client(&server, None).summarise("x").await.unwrap_err();
        assert!(matches!(err, AssistError::Status(429)));
    }
}
