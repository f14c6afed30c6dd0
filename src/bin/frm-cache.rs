// FRM Exporter - Prometheus exporter for Ficsit Remote Monitoring
// Copyright (c) 2025 FRM Exporter contributors
//
// Licensed under the MIT License. See LICENSE file for details.

//! # frm-cache
//!
//! Bounded-history relational cache for the Ficsit Remote Monitoring API:
//! periodically mirrors raw API payloads into a latest-snapshot table and a
//! depth-bounded rolling-history table in Postgres.
//!
//! ## Usage
//!
//! ```bash
//! frm-cache --frm-address http://localhost:8080 \
//!           --pg-host postgres --pg-user postgres --pg-database postgres
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

use frm_exporter::cache::{default_routes, load_routes, MetricCache, DEFAULT_HISTORY_DEPTH};
use frm_exporter::FrmClient;

/// Bounded-history metrics cache for Ficsit Remote Monitoring
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address of the Ficsit Remote Monitoring webserver
    #[arg(long, default_value = "http://localhost:8080")]
    frm_address: String,

    /// Postgres hostname
    #[arg(long, default_value = "postgres")]
    pg_host: String,

    /// Postgres port
    #[arg(long, default_value = "5432")]
    pg_port: u16,

    /// Postgres username
    #[arg(long, default_value = "postgres")]
    pg_user: String,

    /// Postgres password
    #[arg(long, default_value = "secretpassword")]
    pg_password: String,

    /// Postgres database
    #[arg(long, default_value = "postgres")]
    pg_database: String,

    /// CSV file of metric,route pairs to pull (optional third column:
    /// history = true/false)
    #[arg(long)]
    metrics_file: Option<PathBuf>,

    /// Seconds between poll cycles
    #[arg(long, default_value = "10")]
    interval_secs: u64,

    /// Number of polls of rolling history retained per metric
    #[arg(long, default_value_t = DEFAULT_HISTORY_DEPTH)]
    history_depth: i64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
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

    info!("FRM Cache v{}", env!("CARGO_PKG_VERSION"));

    let routes = match &args.metrics_file {
        Some(path) => match load_routes(path) {
            Ok(routes) => routes,
            Err(e) => {
                error!("failed to load metrics file {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => default_routes(),
    };
    info!("tracking {} metric routes", routes.len());

    let options = PgConnectOptions::new()
        .host(&args.pg_host)
        .port(args.pg_port)
        .username(&args.pg_user)
        .password(&args.pg_password)
        .database(&args.pg_database);
    let pool = match PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            error!("failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    let cache = MetricCache::new(pool, args.history_depth);
    if let Err(e) = cache.init_schema().await {
        error!("failed to initialize database schema: {e}");
        std::process::exit(1);
    }

    let client = match FrmClient::new(args.frm_address.clone()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval_secs));
    loop {
        ticker.tick().await;

        for route in &routes {
            // One metric's failure never blocks the others; the next cycle
            // self-heals.
            match cache.update_metric(&client, route).await {
                Ok(count) => {
                    info!(metric = %route.name, records = count, "cached");
                }
                Err(e) => {
                    warn!(metric = %route.name, error = %e, "cache update failed, skipping this cycle");
                }
            }
        }
    }
}
