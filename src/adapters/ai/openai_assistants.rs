//! OpenAI Assistants adapter - Implementation of AssistantService over HTTP.
//!
//! Talks to the Assistants API (v2) with `reqwest`. Every call sends the
//! bearer credential and the `OpenAI-Beta: assistants=v2` header.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIAssistantsConfig::new(api_key)
//!     .with_base_url("https://api.openai.com/v1")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let service = OpenAIAssistantService::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::assistant::{
    AssistantId, MessageContent, MessageRole, Run, RunError, RunId, RunStatus, ThreadId,
    ThreadMessage,
};
use crate::ports::{AssistantService, AssistantServiceError};

const ASSISTANTS_BETA_HEADER: &str = "assistants=v2";

/// Configuration for the OpenAI Assistants adapter.
#[derive(Debug, Clone)]
pub struct OpenAIAssistantsConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Timeout of a single HTTP call.
    pub timeout: Duration,
}

impl OpenAIAssistantsConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a configuration from an already wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Assistants API client.
pub struct OpenAIAssistantService {
    config: OpenAIAssistantsConfig,
    client: Client,
}

impl OpenAIAssistantService {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: OpenAIAssistantsConfig) -> Result<Self, AssistantServiceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                AssistantServiceError::network(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Sends a request and decodes a successful JSON body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AssistantServiceError> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("OpenAI-Beta", ASSISTANTS_BETA_HEADER)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantServiceError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AssistantServiceError::network(format!("Connection failed: {}", e))
                } else {
                    AssistantServiceError::network(e.to_string())
                }
            })?;

        let response = Self::handle_response_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| AssistantServiceError::parse(format!("Failed to parse response: {}", e)))
    }

    /// Maps non-success HTTP statuses onto port errors.
    async fn handle_response_status(response: Response) -> Result<Response, AssistantServiceError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after_header = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u32>().ok());
        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AssistantServiceError::AuthenticationFailed),
            404 => Err(AssistantServiceError::not_found(error_body)),
            429 => Err(AssistantServiceError::RateLimited {
                retry_after_secs: retry_after_header
                    .unwrap_or_else(|| parse_retry_after(&error_body)),
            }),
            400 | 422 => Err(AssistantServiceError::InvalidRequest(error_body)),
            500..=599 => Err(AssistantServiceError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AssistantServiceError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

/// Extracts "try again in Xs" from an error body, defaulting to 30 seconds.
fn parse_retry_after(error_body: &str) -> u32 {
    let message = serde_json::from_str::<ApiErrorBody>(error_body)
        .map(|body| body.error.message)
        .unwrap_or_default();

    message
        .find("try again in ")
        .map(|idx| &message[idx + "try again in ".len()..])
        .and_then(|rest| {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        })
        .unwrap_or(30)
}

#[async_trait]
impl AssistantService for OpenAIAssistantService {
    async fn list_assistants(&self) -> Result<Vec<AssistantId>, AssistantServiceError> {
        let list: ListResponse<ObjectRef> = self
            .send(self.client.get(self.url("/assistants")))
            .await?;

        Ok(list.data.into_iter().map(|a| AssistantId::new(a.id)).collect())
    }

    async fn create_thread(&self) -> Result<ThreadId, AssistantServiceError> {
        let thread: ObjectRef = self
            .send(self.client.post(self.url("/threads")).json(&serde_json::json!({})))
            .await?;

        Ok(ThreadId::new(thread.id))
    }

    async fn add_user_message(
        &self,
        thread_id: &ThreadId,
        content: &str,
    ) -> Result<(), AssistantServiceError> {
        let request = CreateMessageRequest {
            role: MessageRole::User,
            content,
        };
        let _: ObjectRef = self
            .send(
                self.client
                    .post(self.url(&format!("/threads/{}/messages", thread_id)))
                    .json(&request),
            )
            .await?;

        Ok(())
    }

    async fn create_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &AssistantId,
    ) -> Result<Run, AssistantServiceError> {
        let request = CreateRunRequest {
            assistant_id: assistant_id.as_str(),
        };
        let run: RunObject = self
            .send(
                self.client
                    .post(self.url(&format!("/threads/{}/runs", thread_id)))
                    .json(&request),
            )
            .await?;

        Ok(run.into())
    }

    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<Run, AssistantServiceError> {
        let run: RunObject = self
            .send(
                self.client
                    .get(self.url(&format!("/threads/{}/runs/{}", thread_id, run_id))),
            )
            .await?;

        Ok(run.into())
    }

    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantServiceError> {
        let list: ListResponse<MessageObject> = self
            .send(
                self.client
                    .get(self.url(&format!("/threads/{}/messages", thread_id))),
            )
            .await?;

        Ok(list.data.into_iter().map(ThreadMessage::from).collect())
    }
}

// ----- Assistants API Types -----

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ObjectRef {
    id: String,
}

#[derive(Debug, Serialize)]
struct CreateMessageRequest<'a> {
    role: MessageRole,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateRunRequest<'a> {
    assistant_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct RunObject {
    id: String,
    status: RunStatus,
    #[serde(default)]
    last_error: Option<RunError>,
}

impl From<RunObject> for Run {
    fn from(run: RunObject) -> Self {
        Run {
            id: RunId::new(run.id),
            status: run.status,
            last_error: run.last_error,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageObject {
    role: MessageRole,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<TextContent>,
}

#[derive(Debug, Deserialize)]
struct TextContent {
    value: String,
}

impl From<MessageObject> for ThreadMessage {
    fn from(message: MessageObject) -> Self {
        let content = message
            .content
            .into_iter()
            .map(|block| match block.text {
                Some(text) if block.kind == "text" => MessageContent::Text { value: text.value },
                _ => MessageContent::Other { kind: block.kind },
            })
            .collect();

        ThreadMessage {
            role: message.role,
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
