//! Data visualisation server API

use crate::app_state::{AppState, SharedAppState};
use crate::cli::CommandLineArgs;
use crate::client;
use crate::column;
use crate::error::{self, DatavizError};
use crate::filter;
use crate::metrics::{self, RETURNED_DATAPOINTS};
use crate::models::{DataPoint, FilterOptions, RequestData};
use crate::validated_path::ValidatedPath;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
    routing::get,
    Json, Router,
};
use std::any::Any;
use std::sync::Arc;
use tower::Layer;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;
use tracing::{event, Level};

/// `axum` router wrapped to normalise trailing slashes.
pub type Service = NormalizePath<Router>;

/// Returns a [axum::Router] for the data visualisation API
///
/// The filter endpoint is
/// `GET /:input_variable/:output_variable/:in_min/:in_max/:out_min/:out_max`, which responds with
/// a JSON array of data points. The browser client is served at `/`.
///
/// # Arguments
///
/// * `args`: Command line arguments
fn router(args: &CommandLineArgs) -> Router {
    let state: SharedAppState = Arc::new(AppState::new(args));

    Router::new()
        .route("/", get(client::index))
        .route("/data_viz.js", get(client::script))
        .route("/client-config", get(client::config))
        .route("/metrics", get(metrics::metrics_handler))
        .route(
            "/:input_variable/:output_variable/:in_min/:in_max/:out_min/:out_max",
            get(filter_handler),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .on_request(metrics::request_counter)
                        .on_response(metrics::record_response_metrics),
                )
                .layer(CorsLayer::new().allow_origin(AnyOrigin))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
}

/// Returns a [crate::app::Service] for the data visualisation API
///
/// The service is suitable for serving using [crate::server::serve].
///
/// # Arguments
///
/// * `args`: Command line arguments
pub fn service(args: &CommandLineArgs) -> Service {
    let router = router(args);

    // Note that any middleware that should affect routing must wrap the router.
    // See https://docs.rs/axum/0.6.18/axum/middleware/index.html#rewriting-request-uri-in-middleware
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Handler for the filter endpoint
///
/// Loads the dataset, extracts the input and output columns, and returns the data points that
/// lie within the requested window.
///
/// # Arguments
///
/// * `state`: Shared application state
/// * `request_data`: Variable names and bounds from the request path
/// * `query`: Optional query parameters
#[tracing::instrument(level = "DEBUG", skip(state, query))]
async fn filter_handler(
    State(state): State<SharedAppState>,
    ValidatedPath(request_data): ValidatedPath<RequestData>,
    query: Result<Query<FilterOptions>, QueryRejection>,
) -> Result<Json<Vec<DataPoint>>, DatavizError> {
    let Query(options) = query?;
    let document = state.loader.load().await?;
    let input = column::extract(&document, &request_data.input_variable);
    let output = column::extract(&document, &request_data.output_variable);
    let points = filter::filter_datapoints(
        &input,
        &output,
        &request_data.window(),
        state.args.alignment,
        options.labels,
    )?;
    RETURNED_DATAPOINTS
        .with_label_values(&[])
        .observe(points.len() as f64);
    Ok(Json(points))
}

/// Convert a panic in a handler into the generic server error response.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = err.downcast_ref::<String>() {
        message.as_str()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message
    } else {
        "unknown panic"
    };
    event!(Level::ERROR, "request handler panicked: {}", detail);
    error::server_error_response()
}
