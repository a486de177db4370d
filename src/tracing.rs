//! Tracing (logging)

use crate::cli::CommandLineArgs;

use tracing::{event, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter applied when `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "dataviz=debug,tower_http=debug";

/// Initlialise tracing (logging)
///
/// Applies a filter based on the `RUST_LOG` environment variable, falling back to enable debug
/// logging for this crate and tower_http if not set. Spans are also exported to a Jaeger agent
/// if enabled.
///
/// # Arguments
///
/// * `args`: Command line arguments
pub fn init_tracing(args: &CommandLineArgs) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if !args.enable_jaeger {
        registry.init();
        return;
    }

    match opentelemetry_jaeger::new_agent_pipeline()
        .with_service_name("dataviz")
        .install_batch(opentelemetry::runtime::Tokio)
    {
        Ok(tracer) => {
            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .init();
            event!(Level::INFO, "exporting traces to Jaeger");
        }
        Err(err) => {
            registry.init();
            event!(Level::WARN, "failed to initialise Jaeger tracing: {}", err);
        }
    }
}

/// Flush and shut down any trace exporters.
pub fn shutdown_tracing() {
    opentelemetry::global::shutdown_tracer_provider();
}
