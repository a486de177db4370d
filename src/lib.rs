//! This crate provides a data visualisation server for experiment datasets. It filters the values
//! of an input and an output variable to a two-dimensional window, and serves a browser client
//! which renders the matching points as a scatter plot.
//!
//! A dataset is a JSON document. Variables may appear anywhere in it, with keys matched
//! irrespective of case and with spaces treated as underscores. Values are compared as numbers
//! using lenient coercion, so numeric strings in the dataset or the request match as expected.
//!
//! The server is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team, on top of the [hyper] HTTP library.
//! * [Serde](serde) performs (de)serialisation of the dataset and response data.
//! * [Plotly](https://plotly.com/javascript/) renders the scatter plot in the browser.

pub mod app;
pub mod app_state;
pub mod cli;
pub mod client;
pub mod column;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod models;
pub mod server;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
pub mod types;
pub mod validated_path;
