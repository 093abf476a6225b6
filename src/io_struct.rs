use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The two code-assist operations exposed under `/api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Execute,
    Fix,
}

impl Operation {
    pub fn default_temperature(&self) -> f32 {
        match self {
            Operation::Execute => 0.7,
            Operation::Fix => 0.3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Execute => "execute",
            Operation::Fix => "fix",
        }
    }
}

pub const DEFAULT_LANGUAGE: &str = "python";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Body accepted by `/api/execute` and `/api/fix`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeReqInput {
    pub text: Option<String>,
    pub language: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// A validated request with every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeRequest {
    pub operation: Operation,
    pub source_text: String,
    pub language: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CodeReqInput {
    /// Returns `None` when `text` is missing or empty.
    pub fn into_request(self, operation: Operation) -> Option<CodeRequest> {
        let source_text = self.text.filter(|t| !t.is_empty())?;
        let language = self
            .language
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        Some(CodeRequest {
            operation,
            source_text,
            language,
            temperature: self
                .temperature
                .unwrap_or_else(|| operation.default_temperature()),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }
}

/// The uniform reply shape returned to every caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub is_error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<Value>,
}

impl ResponseEnvelope {
    pub fn ok(text: impl Into<String>) -> Self {
        ResponseEnvelope {
            text: Some(text.into()),
            is_error: false,
            error_message: None,
            error_details: None,
        }
    }

    pub fn client_error(message: impl Into<String>) -> Self {
        ResponseEnvelope {
            text: None,
            is_error: true,
            error_message: Some(message.into()),
            error_details: None,
        }
    }

    pub fn upstream_error(message: impl Into<String>, details: Value) -> Self {
        let message = message.into();
        ResponseEnvelope {
            text: Some(format!(
                "Error calling AI service: {}. Please try again later.",
                message
            )),
            is_error: true,
            error_message: Some(message),
            error_details: Some(details),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Outbound body for `POST <api_base>/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it is present and non-empty.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_text_is_rejected() {
        let input: CodeReqInput = serde_json::from_value(json!({"language": "python"})).unwrap();
        assert!(input.into_request(Operation::Execute).is_none());

        let input: CodeReqInput = serde_json::from_value(json!({"text": ""})).unwrap();
        assert!(input.into_request(Operation::Fix).is_none());

        let input: CodeReqInput = serde_json::from_value(json!({"text": null})).unwrap();
        assert!(input.into_request(Operation::Fix).is_none());
    }

    #[test]
    fn test_whitespace_text_is_forwarded() {
        let input: CodeReqInput = serde_json::from_value(json!({"text": "   "})).unwrap();
        let req = input.into_request(Operation::Execute).unwrap();
        assert_eq!(req.source_text, "   ");
    }

    #[test]
    fn test_defaults_depend_on_operation() {
        let input: CodeReqInput = serde_json::from_value(json!({"text": "print(1)"})).unwrap();
        let req = input.into_request(Operation::Execute).unwrap();
        assert_eq!(req.language, "python");
        assert_eq!(req.temperature, 0.7);
        assert_eq!(req.max_tokens, 1024);

        let input: CodeReqInput =
            serde_json::from_value(json!({"text": "print(1)", "language": ""})).unwrap();
        let req = input.into_request(Operation::Fix).unwrap();
        assert_eq!(req.language, "python");
        assert_eq!(req.temperature, 0.3);
    }

    #[test]
    fn test_explicit_parameters_are_kept() {
        let input: CodeReqInput = serde_json::from_value(json!({
            "text": "console.log(1)",
            "language": "javascript",
            "temperature": 0.1,
            "maxTokens": 256,
            "stream": true
        }))
        .unwrap();
        let req = input.into_request(Operation::Execute).unwrap();
        assert_eq!(req.language, "javascript");
        assert_eq!(req.temperature, 0.1);
        assert_eq!(req.max_tokens, 256);
    }

    #[test]
    fn test_envelope_omits_absent_fields() {
        let value = serde_json::to_value(ResponseEnvelope::client_error("bad")).unwrap();
        assert_eq!(value, json!({"isError": true, "errorMessage": "bad"}));

        let value = serde_json::to_value(ResponseEnvelope::ok("hi")).unwrap();
        assert_eq!(value, json!({"text": "hi", "isError": false}));
    }

    #[test]
    fn test_first_content_skips_empty() {
        let resp: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": ""}}]})).unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatCompletionResponse = serde_json::from_value(json!({"id": "x"})).unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatCompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": "ok"}}]})).unwrap();
        assert_eq!(resp.first_content().as_deref(), Some("ok"));
    }
}
