use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use plara::adapters::http::{api_router, BillingAppState};
use plara::adapters::polar::{PolarApiConfig, PolarBillingAdapter};
use plara::config::{AppConfig, ServerConfig};
use plara::domain::webhook::SignatureVerifier;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.server.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = PolarApiConfig::from_config(&config.polar, &config.server);
    let webhook_verifier = config
        .polar
        .webhook_secret
        .as_deref()
        .map(SignatureVerifier::new);

    if webhook_verifier.is_none() {
        tracing::warn!(
            "No webhook secret configured; webhook deliveries will be rejected until \
             PLARA__POLAR__WEBHOOK_SECRET is set"
        );
    }

    let state = BillingAppState {
        billing_provider: Arc::new(PolarBillingAdapter::new(api_config)),
        webhook_verifier,
        environment: config.server.environment.clone(),
    };

    let app = api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server, &config.polar.frontend_url))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    tracing::info!(
        address = %addr,
        environment = config.server.environment.as_str(),
        "Starting Plara Payment API"
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(listener, app).await.expect("Server error");
}

/// CORS allow-list restricted to the configured storefront origins.
///
/// Falls back to the frontend URL when no explicit list is configured.
fn cors_layer(server: &ServerConfig, frontend_url: &str) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        if let Ok(origin) = frontend_url.parse() {
            origins.push(origin);
        }
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
