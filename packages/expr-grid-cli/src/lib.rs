#![deny(clippy::all)]

//! expr-grid CLI
//!
//! Configuration, logging and the batch driver behind the `exprgrid` binary

// Re-export the evaluator for convenience
pub use expr_grid as grid;

pub mod config;
pub mod driver;
pub mod logging;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
