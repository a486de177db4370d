//! Browser client
//!
//! The client is a single HTML page and script, embedded in the binary. It reads its clamp
//! policies from the server so that they can be changed without editing the script.

use crate::app_state::SharedAppState;
use crate::models::ClientConfig;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};

static INDEX_HTML: &str = include_str!("../static/index.html");
static DATA_VIZ_JS: &str = include_str!("../static/data_viz.js");

/// Serve the client page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Serve the client script.
pub async fn script() -> impl IntoResponse {
    (
        [(&header::CONTENT_TYPE, mime::APPLICATION_JAVASCRIPT_UTF_8.to_string())],
        DATA_VIZ_JS,
    )
}

/// Serve the client configuration.
pub async fn config(State(state): State<SharedAppState>) -> Json<ClientConfig> {
    Json(ClientConfig {
        in_min_clamp: state.args.in_min_clamp,
        out_min_clamp: state.args.out_min_clamp,
    })
}
