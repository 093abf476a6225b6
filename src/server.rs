use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::CodeAssistGateway;
use crate::io_struct::{CodeReqInput, Operation};
use crate::logging;
use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, HttpRequest, HttpResponse, HttpServer, error, get, post, web};
use serde_json::json;

#[derive(Debug, Clone)]
pub struct AppState {
    pub gateway: CodeAssistGateway,
    pub service_name: String,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        Ok(Self {
            gateway: CodeAssistGateway::new(config)?,
            service_name: config.service_name.clone(),
        })
    }
}

// Malformed bodies get the same envelope as a missing `text`.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> Error {
    log::warn!("JSON payload error: {}", err);
    match &err {
        error::JsonPayloadError::OverflowKnownLength { limit, .. }
        | error::JsonPayloadError::Overflow { limit } => {
            GatewayError::PayloadTooLarge { limit: *limit }.into()
        }
        _ => GatewayError::InvalidPayload(err.to_string()).into(),
    }
}

#[get("/")]
pub async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": format!("{} API Server Running", app_state.service_name),
    }))
}

#[post("/api/execute")]
pub async fn execute(
    req: web::Json<CodeReqInput>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let reply = app_state
        .gateway
        .handle(Operation::Execute, req.into_inner())
        .await?;
    Ok(reply.into())
}

#[post("/api/fix")]
pub async fn fix(
    req: web::Json<CodeReqInput>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, GatewayError> {
    let reply = app_state
        .gateway
        .handle(Operation::Fix, req.into_inner())
        .await?;
    Ok(reply.into())
}

pub fn build_cors(config: &GatewayConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600);
    if config.allows_any_origin() {
        cors.allow_any_origin()
    } else {
        config
            .cors_allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

pub fn build_app(
    app_state: web::Data<AppState>,
    config: GatewayConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let json_config = web::JsonConfig::default()
        .limit(config.max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .wrap(build_cors(&config))
        .wrap(actix_web::middleware::Logger::default())
        .app_data(app_state)
        .app_data(json_config)
        .service(health)
        .service(execute)
        .service(fix)
}

pub async fn startup(config: GatewayConfig) -> std::io::Result<()> {
    logging::init_logging(config.log_level.as_deref());

    let app_state = AppState::new(&config).map_err(std::io::Error::other)?;
    log::info!("API key present: {}", app_state.gateway.has_api_key());
    log::info!("Upstream model: {}", config.upstream.model);
    log::info!("Upstream failure policy: {:?}", config.failure_policy);
    if config.allows_any_origin() {
        log::info!("CORS: any origin");
    } else {
        log::info!("CORS allowed origins: {:?}", config.cors_allowed_origins);
    }
    log::info!("Starting server at {}:{}", config.host, config.port);

    let app_state = web::Data::new(app_state);
    let bind = (config.host.clone(), config.port);
    HttpServer::new(move || build_app(app_state.clone(), config.clone()))
        .bind(bind)?
        .run()
        .await?;

    std::io::Result::Ok(())
}
