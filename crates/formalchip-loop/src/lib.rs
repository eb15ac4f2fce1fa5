//! The bounded propose → prove → repair state machine: `INIT` →
//! `SYNTHESISED` → `ITERATE` → `TERMINAL{pass,fail,error}`.
//!
//! Reporting, KPI, and evidence-pack construction are deliberately not
//! called from here — they read the sealed `state.json` this crate writes,
//! from their own crates, once the loop has reached a terminal state.

pub mod error;

pub use error::LoopError;

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};

use formalchip_config::FormalChipConfig;
use formalchip_engine::{EngineRunInput, FormalEngine};
use formalchip_llm::LlmBackend;
use formalchip_runstate::{IterationRecord, RunRecorder, RunStatus, Status};
use formalchip_synthesis::{emit_sva_file, PropertyCandidate};
use formalchip_utils::atomic_write::write_file_atomic;
use formalchip_utils::ids::{new_run_id, utc_now_iso};

/// What the loop produced, independent of whatever reporting/evidence the
/// CLI layers on top afterward.
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub run_id: String,
    pub run_dir: Utf8PathBuf,
    pub status: RunStatus,
    pub iterations_run: u32,
    pub tool_versions: BTreeMap<String, String>,
}

fn snapshot_config(config_path: &Utf8Path, run_dir: &Utf8Path) -> Result<(), LoopError> {
    let extension = config_path.extension().unwrap_or("toml");
    let dest = run_dir.join(format!("config.snapshot.{extension}"));
    let content = std::fs::read_to_string(config_path.as_std_path()).map_err(|e| LoopError::ReadFailed {
        path: config_path.to_string(),
        reason: e.to_string(),
    })?;
    write_file_atomic(&dest, &content).map_err(|e| LoopError::WriteFailed {
        path: dest.to_string(),
        reason: e.to_string(),
    })
}

/// Run the full iteration loop for a validated config, returning once a
/// terminal status is reached or `max_iterations` is exhausted.
pub fn run_loop(
    config_path: &Utf8Path,
    config: &FormalChipConfig,
    llm: &dyn LlmBackend,
    engine: &dyn FormalEngine,
    max_iterations_override: Option<u32>,
) -> Result<LoopOutcome, LoopError> {
    let run_id = new_run_id(&config.project.name);
    let run_dir = config.loop_cfg.workdir.join(&run_id);
    std::fs::create_dir_all(run_dir.as_std_path()).map_err(|e| LoopError::WriteFailed {
        path: run_dir.to_string(),
        reason: e.to_string(),
    })?;
    snapshot_config(config_path, &run_dir)?;

    let mut recorder = RunRecorder::new(run_dir.clone(), run_id.clone(), config_path.to_string());
    recorder
        .save_state()
        .map_err(|e| LoopError::State(e.to_string()))?;
    recorder
        .trace("run_started", serde_json::json!({ "run_id": run_id }))
        .map_err(|e| LoopError::State(e.to_string()))?;

    let clauses = formalchip_clauses::load_spec_clauses(&config.specs)?;
    let signals = formalchip_signals::collect_signals(&config.project.rtl_files)?;
    let libraries = config.effective_libraries();
    let inputs = config.synthesis_inputs(signals);

    recorder
        .trace(
            "clauses_loaded",
            serde_json::json!({
                "clause_count": clauses.len(),
                "known_signal_count": inputs.known_signals.len(),
            }),
        )
        .map_err(|e| LoopError::State(e.to_string()))?;

    let mut tool_versions = BTreeMap::new();
    tool_versions.insert(engine.name().to_string(), engine.tool_version());
    recorder
        .trace(
            "tool_versions",
            serde_json::to_value(&tool_versions).unwrap_or_default(),
        )
        .map_err(|e| LoopError::State(e.to_string()))?;

    let mut candidates: Vec<PropertyCandidate> = llm.propose(&clauses, &libraries, &inputs)?;
    recorder
        .trace(
            "synthesised",
            serde_json::json!({ "candidate_count": candidates.len() }),
        )
        .map_err(|e| LoopError::State(e.to_string()))?;

    let max_iterations = max_iterations_override.unwrap_or(config.loop_cfg.max_iterations).max(1);
    let timeout = Duration::from_secs(config.engine.timeout_s);

    let mut final_status = RunStatus::Running;
    let mut iterations_run = 0u32;

    for iteration in 1..=max_iterations {
        let span = tracing::info_span!("engine_run", run_id = %run_id, iteration);
        let _enter = span.enter();

        let iter_dir = run_dir.join(format!("iter_{iteration:02}"));
        std::fs::create_dir_all(iter_dir.as_std_path()).map_err(|e| LoopError::WriteFailed {
            path: iter_dir.to_string(),
            reason: e.to_string(),
        })?;

        let property_file = iter_dir.join("properties.sv");
        let sva = emit_sva_file(&candidates);
        write_file_atomic(&property_file, &sva).map_err(|e| LoopError::WriteFailed {
            path: property_file.to_string(),
            reason: e.to_string(),
        })?;

        let started_at = utc_now_iso();
        let started_instant = Instant::now();

        let engine_input = EngineRunInput {
            run_id: run_id.clone(),
            iteration,
            top_module: config.project.top_module.clone(),
            clock: config.project.clock.clone(),
            reset: config.project.reset.clone(),
            rtl_files: config.project.rtl_files.clone(),
            property_file: property_file.clone(),
            candidates: &candidates,
            iteration_dir: iter_dir.clone(),
            timeout,
        };
        let feedback = engine.run(&engine_input)?;

        let completed_at = utc_now_iso();
        let duration_s = started_instant.elapsed().as_secs_f64();
        let engine_log_name = if engine.name() == "mock" { "mock.log" } else { "engine.log" };

        let status = feedback.status;
        let record = IterationRecord {
            iteration,
            feedback,
            property_file: format!("iter_{iteration:02}/properties.sv"),
            engine_log: format!("iter_{iteration:02}/{engine_log_name}"),
            started_at,
            completed_at,
            duration_s,
        };
        recorder
            .record_iteration(record)
            .map_err(|e| LoopError::State(e.to_string()))?;
        iterations_run = iteration;

        match status {
            Status::Pass => {
                final_status = RunStatus::Pass;
                break;
            }
            Status::Error => {
                final_status = RunStatus::Error;
                break;
            }
            Status::Fail | Status::Unknown => {
                if iteration == max_iterations {
                    final_status = RunStatus::from(status);
                    break;
                }
                let last_record = recorder
                    .state()
                    .last_iteration()
                    .expect("an iteration was just recorded")
                    .feedback
                    .clone();
                let repair_span = tracing::info_span!("repair", run_id = %run_id, iteration);
                let _repair_enter = repair_span.enter();
                candidates = llm.repair(&candidates, &last_record, &clauses, &libraries, &inputs)?;
                recorder
                    .trace(
                        "repair",
                        serde_json::json!({ "iteration": iteration, "candidate_count": candidates.len() }),
                    )
                    .map_err(|e| LoopError::State(e.to_string()))?;
            }
        }
    }

    recorder
        .finish(final_status)
        .map_err(|e| LoopError::State(e.to_string()))?;
    recorder
        .trace("run_completed", serde_json::json!({ "status": format!("{final_status:?}") }))
        .map_err(|e| LoopError::State(e.to_string()))?;

    Ok(LoopOutcome {
        run_id,
        run_dir,
        status: final_status,
        iterations_run,
        tool_versions,
    })
}
