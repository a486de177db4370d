//! This file defines the dataviz binary entry point.

use dataviz::app;
use dataviz::cli;
use dataviz::metrics;
use dataviz::server;
use dataviz::tracing;

use ::tracing::{event, Level};

/// Application entry point
#[tokio::main]
async fn main() {
    let args = cli::parse();
    tracing::init_tracing(&args);
    event!(Level::DEBUG, "{:?}", args);
    metrics::register_metrics();
    event!(Level::INFO, "serving dataset {}", args.dataset);
    let service = app::service(&args);
    server::serve(&args, service).await;
    tracing::shutdown_tracing();
}
