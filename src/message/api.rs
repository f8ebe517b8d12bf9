//! Chat-completion HTTP client.
//!
//! One outbound POST per invocation: bearer-token auth, JSON body, fixed
//! timeout. No retries and no caching. Status/body handling lives in
//! [`extract_content`] so the failure branches stay testable without a
//! server.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Request body for the chat-completion endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation messages (system instruction + user prompt).
    pub messages: Vec<ChatMessage>,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Sampling temperature; omitted from the wire when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A single role/content message.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    /// Message role ("system" or "user").
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
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
    content: String,
}

/// Sends a chat-completion request and returns the first choice's text.
pub async fn complete(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    request: &ChatRequest,
) -> Result<String> {
    debug!(
        endpoint = %endpoint,
        model = %request.model,
        max_tokens = request.max_tokens,
        "sending chat-completion request"
    );

    let response = client
        .post(endpoint)
        .bearer_auth(api_key)
        .json(request)
        .send()
        .await
        .map_err(|err| {
            warn!(endpoint = %endpoint, error = %err, "chat-completion request failed");
            Error::api_request(err.to_string())
        })?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|err| Error::api_request(format!("failed to read response body: {err}")))?;

    let content = extract_content(status, &body)?;
    debug!(response_len = content.len(), "received chat completion");
    Ok(content)
}

/// Extracts the first choice's trimmed content from a raw response.
///
/// Anything other than HTTP 200 with a well-formed body is an error; the
/// generator maps every error to the fallback message.
pub fn extract_content(status: u16, body: &str) -> Result<String> {
    if status != 200 {
        return Err(Error::ApiStatus {
            status,
            body: body.to_string(),
        });
    }

    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|err| Error::api_response(err.to_string()))?;

    let first = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::api_response("no choices in response"))?;

    Ok(first.message.content.trim().to_string())
}
