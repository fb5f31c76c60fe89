//! OpenAI-compatible chat completions client
//!
//! Sends a fixed banking system instruction plus the user query and returns
//! the first completion. Uses a long-lived reqwest::Client for connection pooling.

use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::models::{Credential, ModeLabel, ResponseResult};
use crate::responder::RemoteResponder;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

const SYSTEM_PROMPT: &str = "You are a helpful banking assistant. Be concise and professional. If asked non-banking questions, you can answer briefly but remind them you're a banking assistant.";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 200;

const PROBE_PROMPT: &str = "Say 'AI is working!' in 3 words";
const PROBE_MAX_TOKENS: u32 = 10;

/// Reusable chat completions client (connection-pooled)
pub struct OpenAiResponder {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAiResponder {
    pub fn new(config: &RemoteConfig) -> crate::Result<Self> {
        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn complete(
        &self,
        request: &ChatRequest<'_>,
        credential: &Credential,
    ) -> std::result::Result<String, RemoteError> {
        debug!("Calling chat completions API (model: {})", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completions request failed: {}", e);
                RemoteError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!("Chat completions API error response: {}", body);
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        parse_completion(&body)
    }
}

#[async_trait]
impl RemoteResponder for OpenAiResponder {
    async fn respond(
        &self,
        query: &str,
        credential: &Credential,
    ) -> std::result::Result<ResponseResult, RemoteError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: query,
                },
            ],
            temperature: Some(TEMPERATURE),
            max_tokens: MAX_TOKENS,
        };

        let answer = self.complete(&request, credential).await?;
        info!("Chat completion received ({} chars)", answer.len());

        Ok(ResponseResult::new(answer, ModeLabel::AiMode))
    }

    async fn probe(&self, credential: &Credential) -> std::result::Result<String, RemoteError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: PROBE_PROMPT,
            }],
            temperature: None,
            max_tokens: PROBE_MAX_TOKENS,
        };

        self.complete(&request, credential).await
    }
}

/// Extract the first completion's text from a response body
fn parse_completion(body: &str) -> std::result::Result<String, RemoteError> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse chat completions response: {}", e);
        RemoteError::MalformedResponse(e.to_string())
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or(RemoteError::EmptyCompletion)
}

/// Prefer the API's own error message, fall back to the raw body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}
