//! Commit-message generation.
//!
//! A single configurable generator behind named presets. Given a prompt, an
//! API key, and options, it asks a chat-completion endpoint for a commit
//! message, cleans the result, and degrades to [`FALLBACK_MESSAGE`] on every
//! failure. The policy is "never block a commit": [`generate`] is infallible
//! and the cause of a fallback is carried in the outcome for callers that
//! want to report it.

pub mod api;
pub mod sanitize;

use crate::config::MessageConfig;
use crate::core::error::Error;
use api::{ChatMessage, ChatRequest};
use std::time::Duration;
use tracing::{debug, warn};

/// Fixed text printed whenever generation cannot complete.
pub const FALLBACK_MESSAGE: &str = "Update project files";

/// Generator presets.
///
/// Each preset is one of the historical parameter sets: a terse single-line
/// generator, the everyday default, and a roomier variant that allows a
/// short body.
pub mod presets {
    /// Available preset names.
    pub mod names {
        /// Single-line message, minimal tokens.
        pub const BRIEF: &str = "brief";
        /// Everyday default.
        pub const STANDARD: &str = "standard";
        /// Subject plus a short body, temperature unset.
        pub const DETAILED: &str = "detailed";
    }

    /// Returns a list of available preset names.
    #[must_use]
    pub const fn available() -> &'static [&'static str] {
        &[names::BRIEF, names::STANDARD, names::DETAILED]
    }

    /// Returns true if the preset name is valid.
    #[must_use]
    pub fn is_valid(name: &str) -> bool {
        available().contains(&name)
    }
}

/// Options controlling a single generation request.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Chat-completion endpoint URL.
    pub endpoint: String,
    /// Environment variable the API key is read from (for reporting).
    pub api_key_env: String,
    /// Model identifier.
    pub model: String,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Sampling temperature; omitted from the request when unset.
    pub temperature: Option<f32>,
    /// System instruction; omitted from the request when unset.
    pub system_prompt: Option<String>,
    /// Whether to clean the returned text.
    pub sanitize: bool,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeneratorOptions {
    /// Builds options from configuration, resolving the model env override.
    #[must_use]
    pub fn from_config(config: &MessageConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            api_key_env: config.api_key_env.clone(),
            model: config.resolve_model(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
            sanitize: config.sanitize,
            timeout: config.timeout_duration(),
        }
    }

    /// Applies a named preset's parameter set.
    ///
    /// Unknown names leave the options untouched and return false.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        match name {
            presets::names::BRIEF => {
                self.max_tokens = 30;
                self.temperature = Some(0.1);
                self.system_prompt = Some(
                    "Respond with a single-line git commit message only, nothing else."
                        .to_string(),
                );
                self.sanitize = true;
            },
            presets::names::STANDARD => {
                self.max_tokens = 150;
                self.temperature = Some(0.2);
                self.system_prompt = Some(crate::config::DEFAULT_SYSTEM_PROMPT.to_string());
                self.sanitize = true;
            },
            presets::names::DETAILED => {
                self.max_tokens = 300;
                self.temperature = None;
                self.system_prompt = Some(
                    "You write git commit messages: a subject line under 80 characters, \
                     optionally followed by up to two body lines. Respond with the commit \
                     message text only."
                        .to_string(),
                );
                self.sanitize = true;
            },
            _ => return false,
        }
        true
    }
}

/// Why a generation degraded to the fallback message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No prompt was provided; no request was made.
    EmptyPrompt,
    /// The API key env var was unset; no request was made.
    MissingApiKey(String),
    /// The request failed in transport (connection, TLS, timeout).
    Request(String),
    /// The endpoint answered with a non-200 status.
    Status(u16),
    /// The endpoint answered 200 with an unusable body.
    MalformedResponse(String),
    /// The completion was empty after cleanup.
    EmptyCompletion,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPrompt => write!(f, "no prompt provided"),
            Self::MissingApiKey(var) => write!(f, "API key not set ({var})"),
            Self::Request(detail) => write!(f, "request failed: {detail}"),
            Self::Status(code) => write!(f, "endpoint returned status {code}"),
            Self::MalformedResponse(detail) => write!(f, "malformed response: {detail}"),
            Self::EmptyCompletion => write!(f, "endpoint returned an empty message"),
        }
    }
}

/// Result of a generation attempt.
///
/// `message` is always printable: either the generated text or
/// [`FALLBACK_MESSAGE`] with the reason attached.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    /// The message to print.
    pub message: String,
    /// Why the fallback was used, when it was.
    pub fallback: Option<FallbackReason>,
}

impl GenerateOutcome {
    fn generated(message: String) -> Self {
        Self {
            message,
            fallback: None,
        }
    }

    fn fallback(reason: FallbackReason) -> Self {
        Self {
            message: FALLBACK_MESSAGE.to_string(),
            fallback: Some(reason),
        }
    }

    /// Returns true if the fallback message was used.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Generates a commit message for the given prompt.
///
/// Never fails: every error path returns an outcome carrying
/// [`FALLBACK_MESSAGE`] and the reason.
pub async fn generate(
    options: &GeneratorOptions,
    api_key: Option<&str>,
    prompt: &str,
) -> GenerateOutcome {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return GenerateOutcome::fallback(FallbackReason::EmptyPrompt);
    }

    let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) else {
        debug!(var = %options.api_key_env, "no API key; using fallback message");
        return GenerateOutcome::fallback(FallbackReason::MissingApiKey(
            options.api_key_env.clone(),
        ));
    };

    let mut messages = Vec::with_capacity(2);
    if let Some(ref system) = options.system_prompt {
        messages.push(ChatMessage::system(system.clone()));
    }
    messages.push(ChatMessage::user(prompt));

    let request = ChatRequest {
        model: options.model.clone(),
        messages,
        max_tokens: options.max_tokens,
        temperature: options.temperature,
    };

    let client = match reqwest::Client::builder().timeout(options.timeout).build() {
        Ok(client) => client,
        Err(err) => {
            warn!(error = %err, "failed to build HTTP client");
            return GenerateOutcome::fallback(FallbackReason::Request(err.to_string()));
        },
    };

    let content = match api::complete(&client, &options.endpoint, api_key, &request).await {
        Ok(content) => content,
        Err(err) => return GenerateOutcome::fallback(reason_for(err)),
    };

    let text = if options.sanitize {
        sanitize::clean(&content)
    } else {
        content
    };

    if text.is_empty() {
        return GenerateOutcome::fallback(FallbackReason::EmptyCompletion);
    }

    GenerateOutcome::generated(text)
}

fn reason_for(err: Error) -> FallbackReason {
    match err {
        Error::ApiStatus { status, .. } => FallbackReason::Status(status),
        Error::ApiResponse { message } => FallbackReason::MalformedResponse(message),
        Error::ApiRequest { message } => FallbackReason::Request(message),
        other => FallbackReason::Request(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    fn test_options(endpoint: &str) -> GeneratorOptions {
        GeneratorOptions {
            endpoint: endpoint.to_string(),
            api_key_env: "CTK_TEST_API_KEY".to_string(),
            model: "test-model".to_string(),
            max_tokens: 150,
            temperature: Some(0.2),
            system_prompt: Some("commit message text only".to_string()),
            sanitize: true,
            timeout: Duration::from_secs(5),
        }
    }

    /// Serves exactly one canned HTTP response on a local port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
        let addr = listener.local_addr().expect("local addr");

        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0_u8; 8192];
                let _bytes = stream.read(&mut buf);
                let response = format!(
                    "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _result = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{addr}/v1/chat/completions")
    }

    #[tokio::test]
    async fn empty_prompt_falls_back_without_request() {
        // Endpoint is unroutable; reaching it would error differently.
        let options = test_options("http://127.0.0.1:1/unreachable");
        let outcome = generate(&options, Some("key"), "   ").await;

        assert_eq!(outcome.message, FALLBACK_MESSAGE);
        assert_eq!(outcome.fallback, Some(FallbackReason::EmptyPrompt));
    }

    #[tokio::test]
    async fn missing_api_key_falls_back_without_request() {
        let options = test_options("http://127.0.0.1:1/unreachable");
        let outcome = generate(&options, None, "add a parser").await;

        assert_eq!(outcome.message, FALLBACK_MESSAGE);
        assert!(matches!(
            outcome.fallback,
            Some(FallbackReason::MissingApiKey(ref var)) if var == "CTK_TEST_API_KEY"
        ));
    }

    #[tokio::test]
    async fn blank_api_key_counts_as_missing() {
        let options = test_options("http://127.0.0.1:1/unreachable");
        let outcome = generate(&options, Some("  "), "add a parser").await;

        assert!(matches!(
            outcome.fallback,
            Some(FallbackReason::MissingApiKey(_))
        ));
    }

    #[tokio::test]
    async fn connection_failure_falls_back() {
        let options = test_options("http://127.0.0.1:1/unreachable");
        let outcome = generate(&options, Some("key"), "add a parser").await;

        assert_eq!(outcome.message, FALLBACK_MESSAGE);
        assert!(matches!(outcome.fallback, Some(FallbackReason::Request(_))));
    }

    #[tokio::test]
    async fn successful_response_is_sanitized() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"content":"Here is the commit message: Fix bug in parser"}}]}"#,
        );
        let options = test_options(&endpoint);
        let outcome = generate(&options, Some("key"), "fix the parser").await;

        assert_eq!(outcome.message, "Fix bug in parser");
        assert!(!outcome.is_fallback());
    }

    #[tokio::test]
    async fn non_200_status_falls_back() {
        let endpoint = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
        let options = test_options(&endpoint);
        let outcome = generate(&options, Some("key"), "fix the parser").await;

        assert_eq!(outcome.message, FALLBACK_MESSAGE);
        assert_eq!(outcome.fallback, Some(FallbackReason::Status(500)));
    }

    #[tokio::test]
    async fn malformed_body_falls_back() {
        let endpoint = serve_once("200 OK", "not json");
        let options = test_options(&endpoint);
        let outcome = generate(&options, Some("key"), "fix the parser").await;

        assert_eq!(outcome.message, FALLBACK_MESSAGE);
        assert!(matches!(
            outcome.fallback,
            Some(FallbackReason::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn boilerplate_only_completion_falls_back() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"content":"Here is the commit message:"}}]}"#,
        );
        let options = test_options(&endpoint);
        let outcome = generate(&options, Some("key"), "fix the parser").await;

        assert_eq!(outcome.message, FALLBACK_MESSAGE);
        assert_eq!(outcome.fallback, Some(FallbackReason::EmptyCompletion));
    }

    #[tokio::test]
    async fn sanitize_disabled_keeps_raw_content() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"content":"Message: keep this label"}}]}"#,
        );
        let mut options = test_options(&endpoint);
        options.sanitize = false;
        let outcome = generate(&options, Some("key"), "fix the parser").await;

        assert_eq!(outcome.message, "Message: keep this label");
    }

    #[test]
    fn presets_are_valid_names() {
        assert!(presets::is_valid("brief"));
        assert!(presets::is_valid("standard"));
        assert!(presets::is_valid("detailed"));
        assert!(!presets::is_valid("experimental"));
    }

    #[test]
    fn apply_preset_brief() {
        let mut options = test_options("http://example.invalid");
        assert!(options.apply_preset("brief"));
        assert_eq!(options.max_tokens, 30);
        assert_eq!(options.temperature, Some(0.1));
        assert!(options.sanitize);
    }

    #[test]
    fn apply_preset_detailed_unsets_temperature() {
        let mut options = test_options("http://example.invalid");
        assert!(options.apply_preset("detailed"));
        assert_eq!(options.max_tokens, 300);
        assert_eq!(options.temperature, None);
    }

    #[test]
    fn apply_unknown_preset_is_noop() {
        let mut options = test_options("http://example.invalid");
        let before_tokens = options.max_tokens;
        assert!(!options.apply_preset("experimental"));
        assert_eq!(options.max_tokens, before_tokens);
    }

    #[test]
    fn fallback_reason_display() {
        assert_eq!(FallbackReason::EmptyPrompt.to_string(), "no prompt provided");
        assert_eq!(
            FallbackReason::MissingApiKey("MY_KEY".to_string()).to_string(),
            "API key not set (MY_KEY)"
        );
        assert_eq!(
            FallbackReason::Status(429).to_string(),
            "endpoint returned status 429"
        );
        assert_eq!(
            FallbackReason::EmptyCompletion.to_string(),
            "endpoint returned an empty message"
        );
    }
}
