use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor a [`Config`](crate::Config) override is given.
pub const DEFAULT_FILTER: &str = "info,tessera_render=debug,wgpu_core=warn,wgpu_hal=warn,naga=warn";

pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Install a `fmt` subscriber. `RUST_LOG` wins over `filter` when set.
///
/// Installing twice is not an error; the second call is ignored.
pub fn init_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_err()
    {
        tracing::trace!("tracing subscriber already installed");
    }
}
