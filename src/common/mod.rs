//! Common functionality.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Last mitochondrial position shown by the review app.
pub const MAX_POS: f64 = 16_300.0;
/// Upper bound on read depth used for the default depth range.
pub const MAX_READ_DEPTH: f64 = 10_000.0;

/// Build a single-threaded tokio runtime for the blocking CLI entry points.
pub fn runtime() -> Result<tokio::runtime::Runtime, anyhow::Error> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| anyhow::anyhow!("could not build tokio runtime: {}", e))
}
