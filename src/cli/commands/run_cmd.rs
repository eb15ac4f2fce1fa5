//! `formalchip run`: drive the loop to a terminal state, then write the
//! report, KPI report, and evidence pack for it.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;

use formalchip_config::FormalChipConfig;
use formalchip_runstate::{RunRecorder, RunStatus};

use super::factory::{build_engine, build_llm};
use crate::exit_codes::codes;

/// After `run_loop` returns a terminal [`RunRecorder`], write
/// `report/summary.{json,md}`, `report/gate_verdict.json`, `report/kpi.json`,
/// and the evidence pack, recording each path back onto `state.json`.
fn finalize_run(
    run_dir: &Utf8PathBuf,
    config: &FormalChipConfig,
    run_status: RunStatus,
    tool_versions: std::collections::BTreeMap<String, String>,
) -> Result<()> {
    let mut recorder = RunRecorder::load(run_dir.clone()).context("reopen run state after loop completion")?;
    let state = recorder.state().clone();

    let summary = formalchip_report::build_summary(&state);

    // The evidence pack is always written immediately after the gate
    // verdict in this command, so both report/gate_verdict.json and
    // kpi.json can record it as present.
    let gate = formalchip_report::build_gate_verdict(&summary, run_status, &config.kpi, true);

    let report_paths = formalchip_report::write_reports(run_dir, &summary, &gate).context("write reports")?;
    recorder.set_report("summary_json", &report_paths.summary_json)?;
    recorder.set_report("summary_md", &report_paths.summary_md)?;
    recorder.set_report("gate_verdict_json", &report_paths.gate_verdict_json)?;

    let kpi_report = formalchip_kpi::build_kpi_report(run_dir, &state, &config.kpi, true).context("build KPI report")?;
    let kpi_json = run_dir.join("report").join("kpi.json");
    let kpi_body = serde_json::to_string_pretty(&kpi_report)?;
    formalchip_utils::atomic_write::write_file_atomic(&kpi_json, &kpi_body)
        .with_context(|| format!("write {kpi_json}"))?;
    recorder.set_report("kpi_json", &kpi_json)?;

    let evidence_paths = formalchip_evidence::build_evidence_pack(
        run_dir,
        &state.run_id,
        &config.config_path,
        tool_versions,
        gate,
    )
    .context("build evidence pack")?;
    recorder.set_evidence_pack(&evidence_paths.manifest_json)?;

    Ok(())
}

pub fn run(config_path: Utf8PathBuf, max_iterations: Option<u32>) -> Result<i32> {
    let config = formalchip_config::load_config(&config_path).context("load config")?;

    let llm = build_llm(&config)?;
    let engine = build_engine(&config)?;

    let outcome = formalchip_loop::run_loop(&config_path, &config, llm.as_ref(), engine.as_ref(), max_iterations)
        .context("run loop")?;

    finalize_run(&outcome.run_dir, &config, outcome.status, outcome.tool_versions)?;

    println!("run {} ({}): {:?}, {} iteration(s)", outcome.run_id, outcome.run_dir, outcome.status, outcome.iterations_run);

    Ok(if outcome.status == RunStatus::Pass {
        codes::SUCCESS
    } else {
        codes::RUN_NOT_PASS
    })
}
