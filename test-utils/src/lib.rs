//! Shared helpers for the contract-bindgen integration tests.

use log::LevelFilter;

pub mod fixtures;
pub mod generators;

pub use generators::{FailingGenerator, MarkerGenerator};

/// Initializes test logging once; later calls are ignored.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(level)
        .try_init();
}
