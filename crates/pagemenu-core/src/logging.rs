#![forbid(unsafe_code)]

//! Structured logging hooks.
//!
//! All crates log through `tracing` behind their `tracing` feature, using
//! dotted event names (`paging.transition`, `menu.layout`, ...). With the
//! feature off nothing is compiled in. Hosts that want JSON lines on stderr
//! without wiring their own subscriber can enable `tracing-json` and call
//! [`init_json_logging`].

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a JSON subscriber filtered by `RUST_LOG`.
///
/// Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
}
