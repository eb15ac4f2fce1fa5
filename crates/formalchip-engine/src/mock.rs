//! The mock engine: a ground-truth test oracle. Fails the first
//! `pass_after - 1` iterations with a synthetic counterexample, then
//! passes, without ever shelling out to a real solver.

use crate::error::EngineError;
use crate::model::{EngineRunInput, FormalEngine};
use formalchip_runstate::IterationFeedback;
use formalchip_utils::atomic_write::write_file_atomic;

pub struct MockEngine {
    pass_after: u32,
}

impl MockEngine {
    #[must_use]
    pub fn new(pass_after: u32) -> Self {
        MockEngine {
            pass_after: pass_after.max(1),
        }
    }

    fn log_for(&self, input: &EngineRunInput<'_>) -> String {
        if input.iteration >= self.pass_after {
            return "STATUS: PASSED\nAll properties proven.\n".to_string();
        }
        let failing = input
            .candidates
            .first()
            .map(|c| c.name.as_str())
            .unwrap_or("unknown_property");
        format!(
            "STATUS: FAILED\nassertion {failing} failed\ncounterexample: trace for {failing} at cycle {iter}\n",
            iter = input.iteration
        )
    }
}

impl FormalEngine for MockEngine {
    fn name(&self) -> &str {
        "mock"
    }

    fn tool_version(&self) -> String {
        "formalchip-mock/1.0".to_string()
    }

    fn run(&self, input: &EngineRunInput<'_>) -> Result<IterationFeedback, EngineError> {
        let log = self.log_for(input);
        let log_path = input.iteration_dir.join("mock.log");
        write_file_atomic(&log_path, &log).map_err(|e| EngineError::WriteFailed {
            path: log_path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(formalchip_logparse::parse_engine_log(&log))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formalchip_runstate::Status;
    use formalchip_synthesis::{PropertyCandidate, PropertyKind};
    use std::time::Duration;

    fn candidate(name: &str) -> PropertyCandidate {
        PropertyCandidate {
            prop_id: name.to_string(),
            name: name.to_string(),
            body: "@(posedge clk) req |-> ack;".to_string(),
            kind: PropertyKind::Assert,
            source_clause: None,
            notes: String::new(),
        }
    }

    fn input(iteration: u32, dir: &camino::Utf8Path, candidates: &[PropertyCandidate]) -> EngineRunInput<'_> {
        EngineRunInput {
            run_id: "run1".to_string(),
            iteration,
            top_module: "adder".to_string(),
            clock: "clk".to_string(),
            reset: "rst_n".to_string(),
            rtl_files: Vec::new(),
            property_file: dir.join("properties.sv"),
            candidates,
            iteration_dir: dir.to_path_buf(),
            timeout: Duration::from_secs(60),
        }
    }

    #[test]
    fn fails_until_pass_after_then_passes() {
        let engine = MockEngine::new(2);
        let candidates = vec![candidate("p1")];
        let dir = tempfile::tempdir().unwrap();
        let dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();

        let iter1 = engine.run(&input(1, &dir, &candidates)).unwrap();
        assert_eq!(iter1.status, Status::Fail);
        assert_eq!(iter1.failed_properties, vec!["p1".to_string()]);

        let iter2 = engine.run(&input(2, &dir, &candidates)).unwrap();
        assert_eq!(iter2.status, Status::Pass);
    }

    #[test]
    fn pass_after_one_passes_immediately() {
        let engine = MockEngine::new(1);
        let candidates = vec![candidate("p1")];
        let dir = tempfile::tempdir().unwrap();
        let dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        let result = engine.run(&input(1, &dir, &candidates)).unwrap();
        assert_eq!(result.status, Status::Pass);
    }

    #[test]
    fn writes_mock_log_to_iteration_dir() {
        let engine = MockEngine::new(1);
        let dir = tempfile::tempdir().unwrap();
        let dir = camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        engine.run(&input(1, &dir, &[])).unwrap();
        assert!(dir.join("mock.log").exists());
    }
}
