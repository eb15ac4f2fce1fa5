//! The config schema: one `#[derive(Deserialize)]` tree mirroring the
//! documented `[project]`/`[llm]`/`[engine]`/`[loop]`/`[constraints]`/`[kpi]`
//! sections plus `[[specs]]`/`[[libraries]]` arrays.
//!
//! This is the *raw* shape, as decoded straight from TOML/JSON/YAML, with
//! only relative paths and `#[serde(default)]`. Structural validation and
//! path resolution happen in a second pass (see `validate`/`resolve`) so a
//! deserialisation success does not yet imply a usable config.

use camino::Utf8PathBuf;
use formalchip_clauses::SpecInput;
use formalchip_synthesis::LibraryPattern;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_clock() -> String {
    "clk".to_string()
}

fn default_reset() -> String {
    "rst_n".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub rtl_files: Vec<Utf8PathBuf>,
    #[serde(default)]
    pub top_module: String,
    #[serde(default = "default_clock")]
    pub clock: String,
    #[serde(default = "default_reset")]
    pub reset: String,
    #[serde(default = "default_true")]
    pub reset_active_low: bool,
    #[serde(default)]
    pub signal_aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackendKind {
    Deterministic,
    Command,
}

impl Default for LlmBackendKind {
    fn default() -> Self {
        LlmBackendKind::Deterministic
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub backend: LlmBackendKind,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Mock,
    Symbiyosys,
    Vcformal,
    Jasper,
    Questa,
}

impl Default for EngineKind {
    fn default() -> Self {
        EngineKind::Mock
    }
}

impl EngineKind {
    /// Vendor-scripted adapters, as opposed to `mock`/`symbiyosys` which
    /// have dedicated adapters.
    #[must_use]
    pub fn is_scripted(self) -> bool {
        matches!(self, EngineKind::Vcformal | EngineKind::Jasper | EngineKind::Questa)
    }
}

fn default_timeout_s() -> u64 {
    600
}

fn default_pass_after() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub kind: EngineKind,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub sby_file: Option<Utf8PathBuf>,
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
    #[serde(default = "default_pass_after")]
    pub pass_after: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            kind: EngineKind::default(),
            command: None,
            sby_file: None,
            timeout_s: default_timeout_s(),
            pass_after: default_pass_after(),
        }
    }
}

fn default_max_iterations() -> u32 {
    3
}

fn default_workdir() -> Utf8PathBuf {
    Utf8PathBuf::from(".formalchip/runs")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_workdir")]
    pub workdir: Utf8PathBuf,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            max_iterations: default_max_iterations(),
            workdir: default_workdir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintEntry {
    pub name: String,
    pub expr: String,
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintsConfig {
    #[serde(default)]
    pub assumptions: Vec<ConstraintEntry>,
    #[serde(default)]
    pub covers: Vec<ConstraintEntry>,
}

fn default_min_time_reduction_percent() -> f64 {
    30.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiConfig {
    #[serde(default = "default_min_time_reduction_percent")]
    pub min_time_reduction_percent: f64,
    #[serde(default = "default_true")]
    pub require_bug_or_coverage: bool,
    #[serde(default)]
    pub baseline_csv: Option<Utf8PathBuf>,
}

impl Default for KpiConfig {
    fn default() -> Self {
        KpiConfig {
            min_time_reduction_percent: default_min_time_reduction_percent(),
            require_bug_or_coverage: true,
            baseline_csv: None,
        }
    }
}

/// The root config shape, straight off the wire. See [`crate::FormalChipConfig`]
/// for the validated, path-resolved form the rest of the codebase consumes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    pub project: Option<ProjectConfig>,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default, rename = "loop")]
    pub loop_cfg: LoopConfig,
    #[serde(default)]
    pub constraints: ConstraintsConfig,
    #[serde(default)]
    pub kpi: KpiConfig,
    #[serde(default)]
    pub specs: Vec<SpecInput>,
    #[serde(default)]
    pub libraries: Vec<LibraryPattern>,
}

/// The fully validated, path-resolved config: every `Utf8PathBuf` in it is
/// absolute (or at least resolved against the config file's directory),
/// and every invariant §10.1 requires has already been checked.
#[derive(Debug, Clone)]
pub struct FormalChipConfig {
    pub config_path: Utf8PathBuf,
    pub project: ProjectConfig,
    pub llm: LlmConfig,
    pub engine: EngineConfig,
    pub loop_cfg: LoopConfig,
    pub constraints: ConstraintsConfig,
    pub kpi: KpiConfig,
    pub specs: Vec<SpecInput>,
    pub libraries: Vec<LibraryPattern>,
}
