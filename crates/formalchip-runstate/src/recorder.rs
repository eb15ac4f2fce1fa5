//! `RunRecorder`: persists `state.json` (full rewrite after every mutation)
//! and `trace.jsonl` (append-only) for a single run directory.

use crate::model::{IterationRecord, RunState, RunStatus};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use formalchip_utils::atomic_write::{append_line, write_file_atomic};
use formalchip_utils::ids::utc_now_iso;

pub struct RunRecorder {
    run_dir: Utf8PathBuf,
    state: RunState,
}

impl RunRecorder {
    #[must_use]
    pub fn new(run_dir: Utf8PathBuf, run_id: String, config_path: String) -> Self {
        let state = RunState::new(run_id, utc_now_iso(), config_path);
        RunRecorder { run_dir, state }
    }

    /// Reopen a run directory whose `state.json` was written by a prior
    /// `RunRecorder`, so a later process (the CLI, after `run_loop`
    /// returns) can append report and evidence-pack paths to it.
    pub fn load(run_dir: Utf8PathBuf) -> Result<Self> {
        let state_path = run_dir.join("state.json");
        let content = std::fs::read_to_string(&state_path)
            .with_context(|| format!("read {state_path}"))?;
        let state: RunState = serde_json::from_str(&content)
            .with_context(|| format!("parse {state_path}"))?;
        Ok(RunRecorder { run_dir, state })
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn state_path(&self) -> Utf8PathBuf {
        self.run_dir.join("state.json")
    }

    pub fn trace_path(&self) -> Utf8PathBuf {
        self.run_dir.join("trace.jsonl")
    }

    /// Overwrite `state.json` with the current in-memory state.
    pub fn save_state(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.state).context("serialize run state")?;
        write_file_atomic(&self.state_path(), &json)
    }

    /// Append one line to `trace.jsonl`: `{"ts": "...", "event": "...", ...fields}`.
    pub fn trace(&self, event: &str, fields: serde_json::Value) -> Result<()> {
        let mut record = serde_json::json!({
            "ts": utc_now_iso(),
            "event": event,
        });
        if let (serde_json::Value::Object(record_map), serde_json::Value::Object(field_map)) =
            (&mut record, fields)
        {
            record_map.extend(field_map);
        }
        append_line(&self.trace_path(), &record.to_string())
    }

    /// Record one completed iteration and persist `state.json`.
    pub fn record_iteration(&mut self, record: IterationRecord) -> Result<()> {
        self.state.iterations.push(record);
        self.save_state()
    }

    /// Seal the run with a terminal status and persist `state.json`.
    pub fn finish(&mut self, status: RunStatus) -> Result<()> {
        self.state.status = status;
        self.state.completed_at = Some(utc_now_iso());
        self.save_state()
    }

    pub fn set_evidence_pack(&mut self, path: &Utf8Path) -> Result<()> {
        self.state.evidence_pack = Some(path.to_string());
        self.save_state()
    }

    pub fn set_report(&mut self, name: &str, path: &Utf8Path) -> Result<()> {
        self.state.reports.insert(name.to_string(), path.to_string());
        self.save_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IterationFeedback, Status};

    fn sample_iteration(iteration: u32, status: Status) -> IterationRecord {
        IterationRecord {
            iteration,
            feedback: IterationFeedback {
                status,
                summary: "ran".to_string(),
                failed_properties: Vec::new(),
                counterexamples: Vec::new(),
                unsat_cores: Vec::new(),
                coverage_hits: 0,
                artifact_files: Vec::new(),
            },
            property_file: format!("iter_{iteration:02}/properties.sv"),
            engine_log: format!("iter_{iteration:02}/engine.log"),
            started_at: "t0".to_string(),
            completed_at: "t1".to_string(),
            duration_s: 0.5,
        }
    }

    #[test]
    fn save_state_writes_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let recorder = RunRecorder::new(run_dir.clone(), "run1".to_string(), "cfg.toml".to_string());
        recorder.save_state().unwrap();
        let content = std::fs::read_to_string(recorder.state_path()).unwrap();
        let parsed: RunState = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.run_id, "run1");
    }

    #[test]
    fn trace_appends_one_json_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let recorder = RunRecorder::new(run_dir, "run1".to_string(), "cfg.toml".to_string());
        recorder.trace("run_started", serde_json::json!({"clauses": 3})).unwrap();
        recorder.trace("run_completed", serde_json::json!({})).unwrap();
        let content = std::fs::read_to_string(recorder.trace_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["event"], "run_started");
        assert_eq!(first["clauses"], 3);
    }

    #[test]
    fn record_iteration_appends_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut recorder = RunRecorder::new(run_dir, "run1".to_string(), "cfg.toml".to_string());
        recorder.record_iteration(sample_iteration(1, Status::Fail)).unwrap();
        assert_eq!(recorder.state().iterations.len(), 1);
        let content = std::fs::read_to_string(recorder.state_path()).unwrap();
        let parsed: RunState = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.iterations.len(), 1);
    }

    #[test]
    fn load_reopens_a_previously_saved_state() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut recorder = RunRecorder::new(run_dir.clone(), "run1".to_string(), "cfg.toml".to_string());
        recorder.record_iteration(sample_iteration(1, Status::Pass)).unwrap();
        recorder.finish(RunStatus::Pass).unwrap();

        let mut reopened = RunRecorder::load(run_dir).unwrap();
        assert_eq!(reopened.state().run_id, "run1");
        assert_eq!(reopened.state().iterations.len(), 1);
        reopened.set_report("summary_json", Utf8Path::new("report/summary.json")).unwrap();
        assert_eq!(
            reopened.state().reports.get("summary_json").map(String::as_str),
            Some("report/summary.json")
        );
    }

    #[test]
    fn finish_sets_terminal_status_and_completed_at() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let mut recorder = RunRecorder::new(run_dir, "run1".to_string(), "cfg.toml".to_string());
        recorder.finish(RunStatus::Pass).unwrap();
        assert_eq!(recorder.state().status, RunStatus::Pass);
        assert!(recorder.state().completed_at.is_some());
    }
}
