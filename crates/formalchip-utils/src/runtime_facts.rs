//! Runtime facts recorded into the evidence manifest.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RuntimeFacts {
    pub formalchip_version: String,
    pub target: String,
    pub os: String,
    pub arch: String,
    pub cwd: String,
}

#[must_use]
pub fn gather_runtime_facts() -> RuntimeFacts {
    RuntimeFacts {
        formalchip_version: env!("CARGO_PKG_VERSION").to_string(),
        target: format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS),
        os: std::env::consts::OS.to_string(),
        arch: std::env::consts::ARCH.to_string(),
        cwd: std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_default(),
    }
}

/// Resolve a binary on PATH, returning `None` rather than an error.
#[must_use]
pub fn which_or_none(binary: &str) -> Option<String> {
    which::which(binary)
        .ok()
        .map(|p| p.display().to_string())
}
