use crate::logging::DEFAULT_FILTER;

/// Process-wide settings consumed by [`init`](crate::init).
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing` env-filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub profiling: ProfilingMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: DEFAULT_FILTER.to_string(),
            profiling: ProfilingMode::Off,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfilingMode {
    /// Profiling scopes are disabled
    #[default]
    Off,
    /// Scopes are recorded and can be inspected in-process
    On,
    /// Scopes are recorded and streamed to `puffin_viewer` over HTTP
    WithWebserver,
}
