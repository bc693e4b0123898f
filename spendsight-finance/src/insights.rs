//! Insight client: sends the spending summary to a hosted language model
//! and returns its commentary.
//!
//! One request per run. No retries, caching or rate limiting; failures
//! surface as `Error::ExternalService`.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use spendsight_core::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, warn};

/// Fixed instruction placed before the summary body
pub const INSIGHT_PROMPT_PREFIX: &str = "Analyze the following financial data and provide insights on spending habits, areas where the budget is being overrun, and suggestions for saving money:";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Anthropic,
}

impl Provider {
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4o-mini",
            Provider::Anthropic => "claude-3-5-haiku-latest",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com",
            Provider::Anthropic => "https://api.anthropic.com",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAI => f.write_str("openai"),
            Provider::Anthropic => f.write_str("anthropic"),
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" => Ok(Provider::Anthropic),
            other => Err(Error::Config(format!(
                "unknown insight provider {other:?} (expected openai or anthropic)"
            ))),
        }
    }
}

/// Everything the client needs, resolved once at startup
#[derive(Clone)]
pub struct InsightConfig {
    pub provider: Provider,
    pub model: String,
    pub base_url: String,
    pub api_key: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

// Keep the key out of debug logs
impl fmt::Debug for InsightConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsightConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl InsightConfig {
    /// Provider defaults with the given key
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::Config(format!(
                "API key for {provider} is empty (set {})",
                provider.default_api_key_env()
            )));
        }
        Ok(Self {
            provider,
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
            api_key,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Anything that can turn a summary into insight text
#[async_trait]
pub trait InsightSource: Send + Sync {
    async fn insights(&self, summary: &str) -> Result<String>;
}

/// Full prompt sent to the model
pub fn build_prompt(summary: &str) -> String {
    format!("{INSIGHT_PROMPT_PREFIX}\n\n{summary}")
}

/// Split insight text into display bullets: one per non-empty line
pub fn insight_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// HTTP client for the configured provider
pub struct InsightClient {
    http_client: reqwest::Client,
    config: InsightConfig,
}

impl InsightClient {
    pub fn new(config: InsightConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    async fn openai_complete(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            messages: Vec<Msg<'a>>,
            temperature: f32,
            max_tokens: u32,
        }

        #[derive(Deserialize)]
        struct Resp {
            choices: Vec<Choice>,
        }

        #[derive(Deserialize)]
        struct Choice {
            message: MsgOut,
        }

        #[derive(Deserialize)]
        struct MsgOut {
            content: Option<String>,
        }

        let body = Req {
            model: &self.config.model,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let resp = self
            .http_client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("openai request: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            warn!(%status, "openai returned an error");
            return Err(Error::ExternalService(format!("openai error: {status} {txt}")));
        }

        let out: Resp = resp
            .json()
            .await
            .map_err(|e| Error::ExternalService(format!("parse openai response: {e}")))?;

        let content = out
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(content)
    }

    async fn anthropic_complete(&self, prompt: &str) -> Result<String> {
        #[derive(Serialize)]
        struct Msg<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Serialize)]
        struct Req<'a> {
            model: &'a str,
            max_tokens: u32,
            temperature: f32,
            messages: Vec<Msg<'a>>,
        }

        #[derive(Deserialize)]
        struct Resp {
            content: Vec<ContentBlock>,
        }

        #[derive(Deserialize)]
        struct ContentBlock {
            #[serde(rename = "type")]
            t: String,
            text: Option<String>,
        }

        let body = Req {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Msg {
                role: "user",
                content: prompt,
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url);
        let resp = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ExternalService(format!("anthropic request: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            warn!(%status, "anthropic returned an error");
            return Err(Error::ExternalService(format!(
                "anthropic error: {status} {txt}"
            )));
        }

        let out: Resp = resp
            .json()
            .await
            .map_err(|e| Error::ExternalService(format!("parse anthropic response: {e}")))?;

        let mut s = String::new();
        for b in out.content {
            if b.t == "text" {
                if let Some(t) = b.text {
                    s.push_str(&t);
                }
            }
        }
        Ok(s)
    }
}

#[async_trait]
impl InsightSource for InsightClient {
    async fn insights(&self, summary: &str) -> Result<String> {
        let prompt = build_prompt(summary);
        debug!(
            provider = %self.config.provider,
            model = %self.config.model,
            prompt_len = prompt.len(),
            "requesting insights"
        );

        let raw = match self.config.provider {
            Provider::OpenAI => self.openai_complete(&prompt).await?,
            Provider::Anthropic => self.anthropic_complete(&prompt).await?,
        };

        let text = raw.trim();
        if text.is_empty() {
            return Err(Error::ExternalService(format!(
                "{} returned an empty completion",
                self.config.provider
            )));
        }

        info!(chars = text.len(), "received insights");
        Ok(text.to_string())
    }
}
