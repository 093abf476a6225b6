use crate::config::{FailurePolicy, GatewayConfig};
use crate::error::{GatewayError, UpstreamError};
use crate::io_struct::{CodeReqInput, Operation, ResponseEnvelope};
use crate::mock;
use crate::prompts::build_prompt;
use crate::upstream::ChatCompletionClient;
use actix_web::HttpResponse;
use actix_web::http::StatusCode;

/// Status and body produced for one code-assist call.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayReply {
    pub status: StatusCode,
    pub envelope: ResponseEnvelope,
}

impl GatewayReply {
    fn ok(text: impl Into<String>) -> Self {
        GatewayReply {
            status: StatusCode::OK,
            envelope: ResponseEnvelope::ok(text),
        }
    }
}

impl From<GatewayReply> for HttpResponse {
    fn from(reply: GatewayReply) -> Self {
        HttpResponse::build(reply.status).json(reply.envelope)
    }
}

/// Turns code-assist requests into chat-completion calls and normalizes
/// whatever comes back. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct CodeAssistGateway {
    api_key: Option<String>,
    failure_policy: FailurePolicy,
    client: ChatCompletionClient,
}

impl CodeAssistGateway {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        Ok(Self {
            api_key: config.upstream.effective_api_key().map(str::to_string),
            failure_policy: config.failure_policy,
            client: ChatCompletionClient::new(&config.upstream)?,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn handle(
        &self,
        operation: Operation,
        input: CodeReqInput,
    ) -> Result<GatewayReply, GatewayError> {
        let req = input
            .into_request(operation)
            .ok_or(GatewayError::MissingText)?;
        log::debug!(
            "{} request: language={}, {} bytes",
            operation.as_str(),
            req.language,
            req.source_text.len()
        );

        let Some(api_key) = self.api_key.as_deref() else {
            log::warn!("No API key configured, returning mock {} response", operation.as_str());
            return Ok(GatewayReply::ok(mock::no_key_response(operation)));
        };

        let prompt = build_prompt(&req);
        match self.client.complete(api_key, &req, prompt).await {
            Ok(text) => Ok(GatewayReply::ok(text)),
            Err(err) => Ok(self.on_upstream_failure(operation, err)),
        }
    }

    fn on_upstream_failure(&self, operation: Operation, err: UpstreamError) -> GatewayReply {
        log::error!(
            "Chat completion call to {} failed for {}: {}",
            self.client.url(),
            operation.as_str(),
            err
        );
        match self.failure_policy {
            FailurePolicy::Propagate => GatewayReply {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                envelope: ResponseEnvelope::upstream_error(err.to_string(), err.details()),
            },
            FailurePolicy::Fallback => GatewayReply::ok(mock::fallback_response(operation)),
        }
    }
}
