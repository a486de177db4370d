//! Command Line Interface (CLI) arguments.

use crate::models::{Alignment, ClampPolicy};

use clap::Parser;

/// Dataviz command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// The IP address on which the server should listen
    #[arg(long, default_value = "0.0.0.0", env = "DATAVIZ_HOST")]
    pub host: String,
    /// The port to which the server should bind
    #[arg(long, default_value_t = 8000, env = "DATAVIZ_PORT")]
    pub port: u16,
    /// Flag indicating whether HTTPS should be used
    #[arg(long, default_value_t = false, env = "DATAVIZ_HTTPS")]
    pub https: bool,
    /// Path to the certificate file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/dataviz/certs/cert.pem",
        env = "DATAVIZ_CERT_FILE"
    )]
    pub cert_file: String,
    /// Path to the key file to be used for HTTPS encryption
    #[arg(
        long,
        default_value = "~/.config/dataviz/certs/key.pem",
        env = "DATAVIZ_KEY_FILE"
    )]
    pub key_file: String,
    /// Maximum time in seconds to wait for operations to complete upon receiving `ctrl+c` signal.
    #[arg(long, default_value_t = 60, env = "DATAVIZ_SHUTDOWN_TIMEOUT")]
    pub graceful_shutdown_timeout: u64,
    /// Whether to enable sending traces to Jaeger.
    #[arg(long, default_value_t = false, env = "DATAVIZ_ENABLE_JAEGER")]
    pub enable_jaeger: bool,
    /// Path to the JSON dataset file
    #[arg(
        long,
        default_value = "uncountable_front_end_dataset.json",
        env = "DATAVIZ_DATASET"
    )]
    pub dataset: String,
    /// Whether to keep the parsed dataset between requests, reloading it when the file's
    /// modification time changes.
    #[arg(long, default_value_t = false, env = "DATAVIZ_USE_DATASET_CACHE")]
    pub use_dataset_cache: bool,
    /// What to do when the input and output variables have different numbers of values
    #[arg(long, value_enum, default_value_t = Alignment::Truncate, env = "DATAVIZ_ALIGNMENT")]
    pub alignment: Alignment,
    /// How the browser client adjusts the input minimum before sending a request
    #[arg(long, value_enum, default_value_t = ClampPolicy::AtLeastZero, env = "DATAVIZ_IN_MIN_CLAMP")]
    pub in_min_clamp: ClampPolicy,
    /// How the browser client adjusts the output minimum before sending a request
    #[arg(long, value_enum, default_value_t = ClampPolicy::AtLeastZero, env = "DATAVIZ_OUT_MIN_CLAMP")]
    pub out_min_clamp: ClampPolicy,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
