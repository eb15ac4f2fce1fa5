//! FormalChip CLI library.
//!
//! The core engineering — clause ingestion, SVA synthesis, the
//! propose/prove/repair loop, engine adapters, log parsing, reporting, KPI,
//! and the evidence pack — lives in the `formalchip-*` workspace crates.
//! This crate is the thin glue that wires them into a `clap` binary: config
//! discovery, logging setup, and subcommand dispatch.

pub mod cli;
pub mod exit_codes;
pub mod logging;

/// The formalchip binary version, as reported by `--version` and recorded
/// in the evidence manifest's runtime facts.
#[must_use]
pub fn formalchip_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
