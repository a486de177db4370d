use crate::cli::CommandLineArgs;
use crate::dataset::DatasetLoader;

use std::sync::Arc;

/// Shared application state passed to each request handler.
pub struct AppState {
    /// Command line arguments.
    pub args: CommandLineArgs,

    /// Dataset loader.
    pub loader: DatasetLoader,
}

impl AppState {
    /// Create and return an [AppState].
    pub fn new(args: &CommandLineArgs) -> Self {
        let loader = DatasetLoader::new(&args.dataset, args.use_dataset_cache);

        Self {
            args: args.clone(),
            loader,
        }
    }
}

/// AppState wrapped in an Atomic Reference Count (Arc) to allow multiple references.
pub type SharedAppState = Arc<AppState>;
