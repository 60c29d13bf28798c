//! Rewriting capability: trait seam plus an OpenAI-compatible chat client

use crate::config::RewriterConfig;
use crate::error::{Result, ResumeOptimizerError};
use crate::rewrite::prompts::{PromptParams, PromptTemplates};
use crate::rewrite::schema::RewrittenResume;
use log::warn;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inputs for one rewrite invocation.
#[derive(Debug, Clone)]
pub struct RewriteRequest {
    pub resume_text: String,
    pub job_text: String,
    /// Missing keywords measured by the "before" scoring pass.
    pub missing_keywords: Vec<String>,
}

/// Polymorphic rewriting capability. The live implementation talks to a chat
/// model over HTTP; tests substitute a stub returning fixed content, keeping
/// the measurement loop deterministic.
pub trait TextRewriter {
    fn rewrite(
        &self,
        request: &RewriteRequest,
    ) -> impl std::future::Future<Output = Result<RewrittenResume>> + Send;
}

/// Rewriter backed by an OpenAI-compatible chat-completions endpoint.
///
/// All non-determinism, timeouts, and retry policy live here; the scoring core
/// never sees any of it.
pub struct ChatRewriter {
    config: RewriterConfig,
    templates: PromptTemplates,
    http: reqwest::Client,
}

impl ChatRewriter {
    pub fn new(config: RewriterConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("resume-optimizer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            config,
            templates: PromptTemplates::default(),
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn request_completion(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_output_tokens),
        };

        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.send_once(&url, &request).await {
                Ok(content) => return Ok(content),
                Err(e) => {
                    if attempt > self.config.max_retries || !should_retry(&e) {
                        return Err(e);
                    }
                    let delay = backoff_delay(
                        Duration::from_millis(self.config.initial_backoff_ms),
                        Duration::from_millis(self.config.max_backoff_ms),
                        attempt - 1,
                    );
                    warn!(
                        "rewrite request failed (attempt {}), retrying in {}ms: {}",
                        attempt,
                        delay.as_millis(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn send_once(&self, url: &str, request: &ChatCompletionRequest) -> Result<String> {
        let mut builder = self
            .http
            .post(url)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .json(request);

        if let Ok(key) = std::env::var(&self.config.api_key_env) {
            if !key.is_empty() {
                builder = builder.bearer_auth(key);
            }
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ResumeOptimizerError::Rewrite(format!(
                "upstream returned status {}: {}",
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let completion: ChatCompletionResponse = resp.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                ResumeOptimizerError::Rewrite("model returned an empty completion".to_string())
            })
    }
}

impl TextRewriter for ChatRewriter {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<RewrittenResume> {
        let prompt = self.templates.render_rewrite(&PromptParams {
            resume_text: request.resume_text.clone(),
            job_text: request.job_text.clone(),
            missing_keywords: request.missing_keywords.clone(),
            max_input_chars: self.config.max_input_chars,
            max_injected_keywords: self.config.max_injected_keywords,
        });

        let content = self.request_completion(&prompt).await?;
        RewrittenResume::from_model_response(&content)
    }
}

fn should_retry(err: &ResumeOptimizerError) -> bool {
    match err {
        ResumeOptimizerError::RewriteRequest(e) => {
            e.is_timeout() || e.is_connect() || e.is_request() || e.is_body() || e.is_decode()
        }
        ResumeOptimizerError::Rewrite(message) => {
            message.contains("status 429") || message.contains("status 5")
        }
        _ => false,
    }
}

fn backoff_delay(initial: Duration, max: Duration, exponent: u32) -> Duration {
    let mult = 1u128.checked_shl(exponent).unwrap_or(u128::MAX);
    let base_ms = initial.as_millis().saturating_mul(mult);
    let capped_ms = std::cmp::min(base_ms, max.as_millis()) as u64;
    Duration::from_millis(capped_ms)
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionMessage {
    content: Option<String>,
}
