use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::io_struct::{ChatCompletionRequest, ChatCompletionResponse, CodeRequest};
use crate::prompts::UpstreamPrompt;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

/// One-shot client for an OpenAI-compatible `chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionClient {
    client: reqwest::Client,
    url: String,
    model: String,
    referer: String,
    app_title: String,
}

impl ChatCompletionClient {
    pub fn new(config: &UpstreamConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: config.completions_url(),
            model: config.model.clone(),
            referer: config.referer.clone(),
            app_title: config.app_title.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn complete(
        &self,
        api_key: &str,
        req: &CodeRequest,
        prompt: UpstreamPrompt,
    ) -> Result<String, UpstreamError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: prompt.into_messages(),
            max_tokens: req.max_tokens,
            temperature: req.temperature,
        };
        let resp = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .header(CONTENT_TYPE, "application/json")
            .header("HTTP-Referer", &self.referer)
            .header("X-Title", &self.app_title)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("Chat completion responded with status {}", status);
        if !status.is_success() {
            let bytes = resp.bytes().await.unwrap_or_default();
            let body = serde_json::from_slice::<Value>(&bytes).unwrap_or_else(|_| {
                if bytes.is_empty() {
                    Value::Null
                } else {
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                }
            });
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatCompletionResponse = resp.json().await?;
        reply.first_content().ok_or(UpstreamError::NoContent)
    }
}
