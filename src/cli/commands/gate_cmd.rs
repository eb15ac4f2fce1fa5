//! `formalchip evaluate-gate`: recompute the KPI report and gate verdict
//! for an already-completed run, optionally against a fresh baseline CSV.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;

use crate::exit_codes::codes;

pub fn run(
    run_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
    baseline_csv: Option<Utf8PathBuf>,
    out: Option<Utf8PathBuf>,
) -> Result<i32> {
    let mut config = formalchip_config::load_config(&config_path).context("load config")?;
    if let Some(baseline_csv) = baseline_csv {
        config.kpi.baseline_csv = Some(baseline_csv);
    }

    let recorder = formalchip_runstate::RunRecorder::load(run_dir.clone())
        .with_context(|| format!("load run state from {run_dir}"))?;
    let state = recorder.state();

    let evidence_pack_present = state.evidence_pack.is_some();
    let kpi_report = formalchip_kpi::build_kpi_report(&run_dir, state, &config.kpi, evidence_pack_present)
        .context("build KPI report")?;

    let out_path = out.unwrap_or_else(|| run_dir.join("report").join("kpi.json"));
    let body = serde_json::to_string_pretty(&kpi_report)?;
    formalchip_utils::atomic_write::write_file_atomic(&out_path, &body)
        .with_context(|| format!("write {out_path}"))?;

    println!("kpi report written to {out_path}");
    println!(
        "overall_success={}, gate.passed={}",
        kpi_report.overall_success, kpi_report.gate.passed
    );

    Ok(if kpi_report.overall_success { codes::SUCCESS } else { codes::CHECK_FAILED })
}
