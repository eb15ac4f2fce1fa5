//! Installs the `tracing-subscriber` layer once at CLI startup.
//!
//! `trace.jsonl` (written by `formalchip-runstate`'s `RunRecorder`) is the
//! spec-mandated, reproducible run record; this subscriber is the
//! operator-facing live log and is complementary to it, not a replacement.

use crate::cli::args::LogFormat;

/// Initialise the global `tracing` subscriber. Safe to call once; a second
/// call is a no-op (the underlying `set_global_default` error is ignored).
pub fn init(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let result = match format {
        LogFormat::Fmt => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("warning: failed to install tracing subscriber: {e}");
    }
}
