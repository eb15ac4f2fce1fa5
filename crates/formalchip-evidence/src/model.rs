//! The evidence manifest shape.

use std::collections::BTreeMap;

use formalchip_report::GateVerdict;
use formalchip_utils::runtime_facts::RuntimeFacts;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub sha256: String,
    pub size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub generated_at: String,
    pub run_dir: String,
    pub config_path: String,
    pub config_sha256: String,
    pub tool_versions: BTreeMap<String, String>,
    pub runtime: RuntimeFacts,
    pub gate: GateVerdict,
    pub files: Vec<FileEntry>,
}

pub struct EvidencePaths {
    pub manifest_json: camino::Utf8PathBuf,
    pub tarball: camino::Utf8PathBuf,
}
