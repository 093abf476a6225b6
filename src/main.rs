use clap::Parser;
use codegenius_gateway::config::{
    self,
    DEFAULT_API_BASE, DEFAULT_APP_TITLE, DEFAULT_MODEL, DEFAULT_REFERER, DEFAULT_SERVICE_NAME,
    FailurePolicy, GatewayConfig, UpstreamConfig,
};
use codegenius_gateway::server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(
        long,
        env = "HOST",
        default_value = "0.0.0.0",
        help = "Host address to bind the server to"
    )]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 4000, help = "Port number to listen on")]
    port: u16,

    #[arg(
        long,
        env = "OPENROUTER_API_KEY",
        hide_env_values = true,
        help = "API key for the chat-completion backend; mock responses are served when unset"
    )]
    api_key: Option<String>,

    #[arg(
        long,
        env = "OPENROUTER_API_BASE",
        default_value = DEFAULT_API_BASE,
        help = "Base URL of the chat-completion API"
    )]
    api_base: String,

    #[arg(long, env = "OPENROUTER_MODEL", default_value = DEFAULT_MODEL, help = "Model to request")]
    model: String,

    #[arg(long, default_value = DEFAULT_REFERER, help = "Value of the HTTP-Referer attribution header")]
    referer: String,

    #[arg(long, default_value = DEFAULT_APP_TITLE, help = "Value of the X-Title attribution header")]
    app_title: String,

    #[arg(
        long,
        default_value = DEFAULT_SERVICE_NAME,
        help = "Service name reported by the health endpoint"
    )]
    service_name: String,

    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        help = "Comma-separated list of allowed CORS origins; any origin when empty"
    )]
    cors_allowed_origins: Vec<String>,

    #[arg(
        long,
        env = "UPSTREAM_FAILURE_POLICY",
        default_value_t = FailurePolicy::Propagate,
        value_enum,
        help = "Answer to a failed upstream call: propagate (HTTP 500) or fallback (canned HTTP 200)"
    )]
    failure_policy: FailurePolicy,

    #[arg(
        long,
        env = "REQUEST_TIMEOUT_SECS",
        default_value_t = 600,
        help = "Timeout in seconds for the upstream call"
    )]
    request_timeout_secs: u64,

    #[arg(
        long,
        default_value_t = 10 * 1024 * 1024,
        help = "Maximum JSON payload size in bytes"
    )]
    max_payload_size: usize,

    #[arg(long, help = "Log level: off, error, warn, info, debug or trace")]
    log_level: Option<String>,
}

impl Args {
    fn into_config(self) -> GatewayConfig {
        GatewayConfig {
            host: self.host,
            port: self.port,
            service_name: self.service_name,
            cors_allowed_origins: self
                .cors_allowed_origins
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            failure_policy: self.failure_policy,
            max_payload_size: self.max_payload_size,
            log_level: self.log_level,
            upstream: UpstreamConfig {
                api_key: self.api_key,
                api_base: self.api_base,
                model: self.model,
                referer: self.referer,
                app_title: self.app_title,
                request_timeout_secs: self.request_timeout_secs,
            },
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    config::load_env_file()?;

    let config = Args::parse().into_config();
    config.validate()?;
    server::startup(config).await?;
    Ok(())
}
