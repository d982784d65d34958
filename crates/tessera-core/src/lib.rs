//! Tessera Core
//!
//! Math, logging and profiling shared by every Tessera crate.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod math;
pub mod profiling;

pub use config::{Config, ProfilingMode};

/// Install logging and profiling according to `config`.
///
/// Call once at startup, before the first frame is rendered.
pub fn init(config: &Config) {
    logging::init_with_filter(&config.log_filter);
    profiling::init_profiling(config.profiling);
}
