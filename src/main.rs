//! visa-guide server binary.

use std::sync::Arc;
use std::time::Duration;

use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use visa_guide::adapters::http::{api_router, ConversationAppState};
use visa_guide::adapters::{InMemorySessionStore, LuisClassifier};
use visa_guide::application::ConversationService;
use visa_guide::config::{AppConfig, LogFormat, ServerConfig};
use visa_guide::ports::IntentClassifier;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let classifier = LuisClassifier::new(config.classifier.luis_config())?;
    let info = classifier.classifier_info();
    tracing::info!(
        classifier = %info.name,
        application = %info.application,
        configured = classifier.is_configured(),
        prompt_for_missing = config.dialog.prompt_for_missing,
        "dialog configured"
    );

    let store = InMemorySessionStore::new();
    if let Some(max_idle) = config.dialog.session_idle_timeout() {
        tokio::spawn(evict_idle_sessions(store.clone(), max_idle));
    }

    let service = ConversationService::builder()
        .session_store(Arc::new(store))
        .classifier(Arc::new(classifier))
        .detail_collector(config.dialog.detail_collector())
        .build()?;

    let app = api_router(ConversationAppState::new(service))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "visa-guide listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("visa-guide shut down");
    Ok(())
}

/// Periodically drops conversations idle for longer than `max_idle`.
async fn evict_idle_sessions(store: InMemorySessionStore, max_idle: Duration) {
    let period = (max_idle / 4).clamp(Duration::from_secs(1), Duration::from_secs(60));
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let evicted = store.evict_idle(max_idle).await;
        if evicted > 0 {
            tracing::info!(evicted, "dropped idle conversations");
        }
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() && !server.is_production() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
