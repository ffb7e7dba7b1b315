use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paypal_ipn::config::{Config, Instance};
use paypal_ipn::handlers;
use paypal_ipn::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paypal_ipn=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    if config.instance == Instance::Sandbox {
        tracing::info!("Running against the PayPal SANDBOX endpoint");
    }
    tracing::info!("PayPal endpoint: {}", config.paypal_url());

    let addr = config.addr();
    let state = AppState::new(config);

    // Build the application router
    let app = handlers::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("PayPal IPN gateway listening on {}", addr);

    // Run server with graceful shutdown
    // Use into_make_service_with_connect_info so log lines carry the client address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
