//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled, [`profile_function!`] and
//! [`profile_scope!`] expand to nothing so instrumented hot paths cost zero.

use crate::config::ProfilingMode;

#[cfg(feature = "profiling")]
pub use puffin::{GlobalProfiler, profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
#[macro_export]
#[doc(hidden)]
macro_rules! __tessera_profile_noop {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::__tessera_profile_noop as profile_function;
#[cfg(not(feature = "profiling"))]
pub use crate::__tessera_profile_noop as profile_scope;

#[cfg(feature = "profiling")]
static PROFILING_SERVER: std::sync::OnceLock<puffin_http::Server> = std::sync::OnceLock::new();

/// Default address of the puffin HTTP server.
pub const PUFFIN_ADDRESS: &str = "0.0.0.0:8585";

/// Enable profiling scopes according to `mode`.
///
/// # Example
/// ```no_run
/// use tessera_core::{ProfilingMode, profiling::init_profiling};
///
/// init_profiling(ProfilingMode::WithWebserver);
/// ```
pub fn init_profiling(mode: ProfilingMode) {
    #[cfg(feature = "profiling")]
    match mode {
        ProfilingMode::Off => puffin::set_scopes_on(false),
        ProfilingMode::On => puffin::set_scopes_on(true),
        ProfilingMode::WithWebserver => {
            puffin::set_scopes_on(true);

            match puffin_http::Server::new(PUFFIN_ADDRESS) {
                Ok(server) => {
                    tracing::info!("Puffin profiler server started on http://{PUFFIN_ADDRESS}");
                    let _ = PROFILING_SERVER.set(server);
                }
                Err(e) => {
                    tracing::error!("Failed to start puffin server: {}", e);
                }
            }
        }
    }

    #[cfg(not(feature = "profiling"))]
    if mode != ProfilingMode::Off {
        tracing::warn!("profiling requested but tessera-core was built without the `profiling` feature");
    }
}

/// Mark the start of a new frame for profiling.
///
/// Call this once per frame, usually right before the scene begins its batches.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
