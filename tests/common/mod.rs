//! Test utilities and fixtures for the PayPal IPN gateway integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

pub use paypal_ipn::config::{Config, Instance};
pub use paypal_ipn::fields::FieldMap;
pub use paypal_ipn::ipn::{self, IpnVerifier};
pub use paypal_ipn::logger::{EventLog, LogMode, Tag, Verbosity};

/// A log that writes nowhere except stderr for errors. Keeps test output
/// quiet while exercising the real code paths.
pub fn quiet_log() -> EventLog {
    EventLog::new(LogMode::No, Verbosity::Low, "test-unused-log.txt".into())
}

/// A file-only log at the given verbosity, for output assertions.
pub fn file_log(level: Verbosity, path: &Path) -> EventLog {
    EventLog::new(LogMode::File, level, path.to_path_buf())
}

/// A quiet gateway configuration pointed at the sandbox endpoint.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        instance: Instance::Sandbox,
        log_mode: LogMode::No,
        log_level: Verbosity::Low,
        log_file: "test-unused-log.txt".into(),
        load_time_secs: 3,
        cart_url: "https://shop.example.com/cart".to_string(),
        orders_url: "https://shop.example.com/orders".to_string(),
        processing_url: String::new(),
    }
}

/// Spawn an in-process echo endpoint replying with a fixed status and body,
/// standing in for PayPal's verification endpoint.
pub async fn spawn_echo_server(status: StatusCode, reply: &'static str) -> String {
    let app = Router::new().route("/", post(move || async move { (status, reply) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind echo server");
    let addr = listener.local_addr().expect("Failed to read echo server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Echo server failed");
    });
    format!("http://{}", addr)
}

/// Spawn an endpoint that records every request body it receives, standing
/// in for the internal processing endpoint.
pub async fn spawn_capture_server() -> (String, Arc<Mutex<Vec<String>>>) {
    let captured: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = captured.clone();

    let app = Router::new().route(
        "/",
        post(move |body: String| {
            let sink = sink.clone();
            async move {
                sink.lock().expect("capture lock poisoned").push(body);
                StatusCode::OK
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind capture server");
    let addr = listener
        .local_addr()
        .expect("Failed to read capture server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Capture server failed");
    });

    (format!("http://{}", addr), captured)
}

/// Serve the full gateway router on an ephemeral port, the way `main` does.
pub async fn spawn_gateway(state: paypal_ipn::state::AppState) -> String {
    let app = paypal_ipn::handlers::router().with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind gateway");
    let addr = listener.local_addr().expect("Failed to read gateway address");
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .await
        .expect("Gateway server failed");
    });
    format!("http://{}", addr)
}

/// An address nothing listens on, for transport-failure tests.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("Failed to read throwaway address");
    drop(listener);
    format!("http://{}", addr)
}
