use std::sync::Arc;

use anyhow::Result;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use consult_relay::adapters::{
    patient_routes, websocket_router, PatientHandlers, RoomManager, WebSocketState,
};
use consult_relay::application::{ConsultationHandlers, ListPatientsHandler, ResponseTiming};
use consult_relay::config::{AppConfig, ServerConfig};
use consult_relay::domain::consultation::RoomRegistry;
use consult_relay::domain::foundation::simulation_rng;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);
    info!(environment = ?config.server.environment, "Starting consult-relay");

    let registry = Arc::new(RoomRegistry::new(simulation_rng(config.simulation.seed)));
    let room_manager = Arc::new(RoomManager::new(config.simulation.room_channel_capacity));
    let timing = ResponseTiming::from_config(&config.simulation);
    let handlers = Arc::new(ConsultationHandlers::new(
        registry.clone(),
        room_manager.clone(),
        timing,
    ));

    let app = build_router(&config.server, room_manager, handlers, registry);

    let addr = config.server.socket_addr()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if server.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_router(
    server: &ServerConfig,
    room_manager: Arc<RoomManager>,
    handlers: Arc<ConsultationHandlers>,
    registry: Arc<RoomRegistry>,
) -> Router {
    let ws_routes = websocket_router().with_state(WebSocketState::new(room_manager, handlers));
    let directory = PatientHandlers::new(Arc::new(ListPatientsHandler::new(registry)));

    Router::new()
        .merge(ws_routes)
        .merge(patient_routes(directory))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// Configured origins only, or any origin when none are set.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
