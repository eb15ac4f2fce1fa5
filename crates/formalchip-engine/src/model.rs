//! The uniform engine-adapter contract: one input shape, one result shape,
//! satisfied identically by the mock, SymbiYosys, and scripted adapters.

use camino::Utf8PathBuf;
use formalchip_synthesis::PropertyCandidate;
use std::time::Duration;

/// Everything an adapter needs to run one iteration's proof attempt.
#[derive(Debug, Clone)]
pub struct EngineRunInput<'a> {
    pub run_id: String,
    pub iteration: u32,
    pub top_module: String,
    pub clock: String,
    pub reset: String,
    pub rtl_files: Vec<Utf8PathBuf>,
    pub property_file: Utf8PathBuf,
    pub candidates: &'a [PropertyCandidate],
    pub iteration_dir: Utf8PathBuf,
    pub timeout: Duration,
}

/// The full contract an engine adapter satisfies. `name`/`tool_version` feed
/// the evidence manifest's `tool_versions` map; `run` performs the actual
/// proof attempt and returns the uniform result the rest of the loop reads.
pub trait FormalEngine {
    fn name(&self) -> &str;
    fn tool_version(&self) -> String;
    fn run(
        &self,
        input: &EngineRunInput<'_>,
    ) -> Result<formalchip_runstate::IterationFeedback, crate::error::EngineError>;
}
