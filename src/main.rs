// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! # frm-exporter
//!
//! Prometheus exporter for the Ficsit Remote Monitoring API.
//!
//! ## Usage
//!
//! ```bash
//! # Export against a local FRM webserver
//! frm-exporter --frm-address http://localhost:8080
//!
//! # Scrape a subset of collectors
//! curl 'http://127.0.0.1:9100/metrics?collect=power,train'
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use clap::Parser;
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use frm_exporter::collect::{scrape, select_kinds};
use frm_exporter::FrmClient;

/// Prometheus exporter for Ficsit Remote Monitoring
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on for the web interface and telemetry
    #[arg(long, default_value = "127.0.0.1:9100")]
    listen_address: String,

    /// Address of the Ficsit Remote Monitoring webserver
    #[arg(long, default_value = "http://localhost:8080")]
    frm_address: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Application state shared across handlers.
struct AppState {
    client: Arc<FrmClient>,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    info!("FRM Exporter v{}", env!("CARGO_PKG_VERSION"));

    let client = match FrmClient::new(args.frm_address.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState { client });

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    let addr: SocketAddr = match args.listen_address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("invalid listen address {:?}: {e}", args.listen_address);
            std::process::exit(1);
        }
    };

    info!("Starting server on http://{}", addr);
    info!("Metrics endpoint: http://{}/metrics", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}

/// Root handler - shows a simple informational page.
async fn root_handler() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>FRM Exporter</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }
        h1 { color: #2c3e50; }
        a { color: #3498db; text-decoration: none; }
        a:hover { text-decoration: underline; }
        .endpoints { background: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0; }
        .endpoint { margin: 10px 0; }
        code { background: #e9ecef; padding: 2px 6px; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>FRM Exporter</h1>
    <p>Prometheus exporter for Ficsit Remote Monitoring telemetry.</p>

    <div class="endpoints">
        <h2>Endpoints</h2>
        <div class="endpoint"><a href="/metrics">/metrics</a> - Prometheus metrics (all collectors)</div>
        <div class="endpoint"><code>/metrics?collect=power,train</code> - Prometheus metrics (selected collectors)</div>
        <div class="endpoint"><a href="/health">/health</a> - Health check</div>
    </div>

    <h2>Collectors</h2>
    <ul>
        <li><code>production</code> - World item production statistics</li>
        <li><code>power</code> - Power circuits and batteries</li>
        <li><code>factory_building</code> - Per-machine production and circuit power</li>
        <li><code>vehicle</code> - Vehicle fuel levels</li>
        <li><code>drone_station</code> - Drone port pairings and power</li>
        <li><code>vehicle_station</code> - Truck station power</li>
        <li><code>train</code> - Train power, mass, and autopilot status</li>
        <li><code>train_station</code> - Train station and platform power</li>
        <li><code>player</code> - Player positions, health, and tag colors</li>
    </ul>
</body>
</html>"#,
    )
}

#[derive(Deserialize)]
struct MetricsParams {
    collect: Option<String>,
}

/// Metrics handler - polls the selected entity kinds and answers in
/// Prometheus text format.
async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MetricsParams>,
) -> impl IntoResponse {
    let kinds = select_kinds(params.collect.as_deref().unwrap_or(""));
    match scrape(Arc::clone(&state.client), kinds).await {
        Ok(body) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("scrape failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
