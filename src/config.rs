use actix_web::http::Uri;
use actix_web::http::header::HeaderValue;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_REFERER: &str = "https://codegenius.ai";
pub const DEFAULT_APP_TITLE: &str = "CodeGenius";
pub const DEFAULT_SERVICE_NAME: &str = "CodeGenius";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingRequired { field: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// What the gateway answers when the chat-completion call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// HTTP 500 with `isError: true` and the upstream details
    #[default]
    Propagate,
    /// HTTP 200 with a canned response
    Fallback,
}

/// Where and how to reach the chat-completion backend.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Bearer key; `None` puts the gateway in mock mode
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Sent as `HTTP-Referer`
    pub referer: String,
    /// Sent as `X-Title`
    pub app_title: String,
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            request_timeout_secs: 600,
        }
    }
}

impl UpstreamConfig {
    /// The configured key, treating blank values as absent.
    pub fn effective_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

/// Gateway configuration, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    /// Empty means any origin
    pub cors_allowed_origins: Vec<String>,
    pub failure_policy: FailurePolicy,
    /// Maximum JSON body size in bytes
    pub max_payload_size: usize,
    /// Log level (None = info)
    pub log_level: Option<String>,
    pub upstream: UpstreamConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            cors_allowed_origins: vec![],
            failure_policy: FailurePolicy::default(),
            max_payload_size: 10 * 1024 * 1024,
            log_level: None,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port".to_string(),
                value: self.port.to_string(),
                reason: "Must be > 0".to_string(),
            });
        }
        if self.max_payload_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_payload_size".to_string(),
                value: self.max_payload_size.to_string(),
                reason: "Must be > 0".to_string(),
            });
        }
        if self.upstream.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs".to_string(),
                value: self.upstream.request_timeout_secs.to_string(),
                reason: "Must be > 0".to_string(),
            });
        }
        if self.upstream.api_base.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "api_base".to_string(),
            });
        }
        if !is_http_url(&self.upstream.api_base) {
            return Err(ConfigError::InvalidValue {
                field: "api_base".to_string(),
                value: self.upstream.api_base.clone(),
                reason: "URL must start with http:// or https://".to_string(),
            });
        }
        if self.upstream.model.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "model".to_string(),
            });
        }
        if let Some(level) = &self.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(ConfigError::InvalidValue {
                    field: "log_level".to_string(),
                    value: level.clone(),
                    reason: "Must be one of off, error, warn, info, debug, trace".to_string(),
                });
            }
        }
        for origin in &self.cors_allowed_origins {
            if origin != "*" && !is_bare_origin(origin) {
                return Err(ConfigError::InvalidValue {
                    field: "cors_allowed_origins".to_string(),
                    value: origin.clone(),
                    reason: "Origin must be '*' or scheme://host[:port] with an http(s) scheme"
                        .to_string(),
                });
            }
        }
        Ok(())
    }

    /// True when any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.is_empty() || self.cors_allowed_origins.iter().any(|o| o == "*")
    }
}

/// Load `.env` from the working directory or its parents. A missing file is
/// fine; a malformed one is an error.
pub fn load_env_file() -> anyhow::Result<()> {
    tolerate_missing(dotenvy::dotenv())
}

pub fn load_env_file_from(path: &Path) -> anyhow::Result<()> {
    tolerate_missing(dotenvy::from_path(path))
}

fn tolerate_missing<T>(result: dotenvy::Result<T>) -> anyhow::Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(anyhow::Error::new(e).context("Failed to load .env")),
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// Same acceptance rule actix-cors applies in `Cors::allowed_origin`, so an
// origin that passes here cannot fail the middleware build later.
fn is_bare_origin(origin: &str) -> bool {
    if !is_http_url(origin) || HeaderValue::from_str(origin).is_err() {
        return false;
    }
    match origin.parse::<Uri>() {
        Ok(uri) => {
            uri.authority().is_some()
                && uri.query().is_none()
                && matches!(uri.path(), "" | "/")
                && !origin.ends_with('/')
        }
        Err(_) => false,
    }
}
