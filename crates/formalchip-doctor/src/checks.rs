//! The preflight checks themselves, run against a resolved config.

use formalchip_config::{EngineKind, FormalChipConfig, LlmBackendKind};
use formalchip_synthesis::LibraryPattern;

use crate::model::DoctorReport;

const PLACEHOLDER_RATIO_WARNING_THRESHOLD: f64 = 0.3;

/// Run every preflight check against `config` and return the full report.
///
/// Deterministic and idempotent: running this twice against the same
/// config and RTL tree produces byte-identical reports (barring changes on
/// disk between calls).
#[must_use]
pub fn run_doctor(config: &FormalChipConfig) -> DoctorReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    let mut readable_rtl = Vec::new();
    for rtl in &config.project.rtl_files {
        if rtl.exists() {
            readable_rtl.push(rtl.clone());
        } else {
            errors.push(format!("RTL file not found: {rtl}"));
        }
    }

    for spec in &config.specs {
        if !spec.path.exists() {
            errors.push(format!("spec file not found: {}", spec.path));
        }
    }

    let signals = formalchip_signals::collect_signals(&readable_rtl).unwrap_or_default();

    let top_present = readable_rtl.iter().any(|rtl| {
        std::fs::read_to_string(rtl.as_std_path())
            .map(|content| content.contains(config.project.top_module.as_str()))
            .unwrap_or(false)
    });
    if !top_present {
        errors.push(format!(
            "top_module `{}` not found in any readable RTL file",
            config.project.top_module
        ));
    }

    if !signals.contains(&config.project.clock) {
        warnings.push(format!(
            "clock signal `{}` not found in the signal catalogue",
            config.project.clock
        ));
    }
    if !signals.contains(&config.project.reset) {
        warnings.push(format!(
            "reset signal `{}` not found in the signal catalogue",
            config.project.reset
        ));
    }

    if config.engine.kind == EngineKind::Symbiyosys
        && formalchip_utils::runtime_facts::which_or_none("sby").is_none()
    {
        errors.push("engine.kind = \"symbiyosys\" but `sby` is not on PATH".to_string());
    }
    if config.engine.kind.is_scripted()
        && config.engine.command.as_deref().unwrap_or("").trim().is_empty()
    {
        errors.push(format!("engine.command is required for engine.kind = {:?}", config.engine.kind));
    }
    if config.llm.backend == LlmBackendKind::Command
        && config.llm.command.as_deref().unwrap_or("").trim().is_empty()
    {
        errors.push("llm.command is required when llm.backend = \"command\"".to_string());
    }

    let libraries = config.effective_libraries();
    for library in &libraries {
        if let LibraryPattern::Unknown { kind, .. } = library {
            warnings.push(format!("unknown library kind: {kind}"));
        }
    }

    let clauses = match formalchip_clauses::load_spec_clauses(&config.specs) {
        Ok(clauses) => clauses,
        Err(e) => {
            errors.push(format!("failed to load spec clauses: {e}"));
            Vec::new()
        }
    };

    let inputs = config.synthesis_inputs(signals);
    let candidates = formalchip_synthesis::synthesize(&clauses, &libraries, &inputs);
    let candidate_count = candidates.len() as u32;
    let placeholder_count = candidates.iter().filter(|c| c.is_placeholder()).count() as u32;

    if candidate_count == 0 {
        errors.push("zero candidates generated".to_string());
    } else {
        let ratio = f64::from(placeholder_count) / f64::from(candidate_count);
        if ratio >= PLACEHOLDER_RATIO_WARNING_THRESHOLD {
            warnings.push(format!("placeholder ratio {ratio:.2} is at or above 0.30"));
        }
    }

    infos.push(format!(
        "{} clauses, {} libraries, {} candidates ({} placeholders)",
        clauses.len(),
        libraries.len(),
        candidate_count,
        placeholder_count
    ));

    DoctorReport { errors, warnings, infos, candidate_count, placeholder_count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use formalchip_config::{ConstraintsConfig, EngineConfig, KpiConfig, LlmConfig, LoopConfig, ProjectConfig};

    fn config_with(rtl_body: &str, top_module: &str) -> (tempfile::TempDir, FormalChipConfig) {
        let dir = tempfile::tempdir().unwrap();
        let rtl_path = Utf8PathBuf::from_path_buf(dir.path().join("top.sv")).unwrap();
        std::fs::write(rtl_path.as_std_path(), rtl_body).unwrap();

        let config = FormalChipConfig {
            config_path: Utf8PathBuf::from_path_buf(dir.path().join("formalchip.toml")).unwrap(),
            project: ProjectConfig {
                name: "adder".to_string(),
                rtl_files: vec![rtl_path],
                top_module: top_module.to_string(),
                clock: "clk".to_string(),
                reset: "rst_n".to_string(),
                reset_active_low: true,
                signal_aliases: Default::default(),
            },
            llm: LlmConfig::default(),
            engine: EngineConfig { kind: EngineKind::Mock, ..EngineConfig::default() },
            loop_cfg: LoopConfig::default(),
            constraints: ConstraintsConfig::default(),
            kpi: KpiConfig::default(),
            specs: Vec::new(),
            libraries: Vec::new(),
        };
        (dir, config)
    }

    #[test]
    fn missing_rtl_file_is_a_fatal_error() {
        let (_dir, mut config) = config_with("module top(input clk, input rst_n); endmodule", "top");
        config.project.rtl_files.push(Utf8PathBuf::from("/no/such/file.sv"));
        let report = run_doctor(&config);
        assert!(!report.ok());
        assert!(report.errors.iter().any(|e| e.contains("not found")));
    }

    #[test]
    fn top_module_absent_from_every_rtl_file_is_fatal() {
        let (_dir, config) = config_with("module top(input clk, input rst_n); endmodule", "nonexistent_module");
        let report = run_doctor(&config);
        assert!(!report.ok());
        assert!(report.errors.iter().any(|e| e.contains("top_module")));
    }

    #[test]
    fn zero_candidates_is_fatal() {
        let (_dir, config) = config_with("module top(input clk, input rst_n); endmodule", "top");
        let report = run_doctor(&config);
        assert!(!report.ok());
        assert_eq!(report.candidate_count, 0);
        assert!(report.errors.iter().any(|e| e.contains("zero candidates")));
    }

    #[test]
    fn clock_not_in_signal_catalogue_is_a_warning_not_an_error() {
        let (_dir, mut config) = config_with("module top(input not_clk, input rst_n); endmodule", "top");
        config.libraries.push(LibraryPattern::Handshake(formalchip_synthesis::HandshakeOptions {
            req: "req".to_string(),
            ack: "ack".to_string(),
            bound: 8,
        }));
        let report = run_doctor(&config);
        assert!(report.warnings.iter().any(|w| w.contains("clock signal")));
    }

    #[test]
    fn unknown_library_kind_is_a_warning() {
        let (_dir, mut config) = config_with("module top(input clk, input rst_n); endmodule", "top");
        let mut raw = serde_json::Map::new();
        raw.insert("kind".to_string(), serde_json::json!("future_pattern"));
        config.libraries.push(LibraryPattern::Unknown { kind: "future_pattern".to_string(), raw });
        let report = run_doctor(&config);
        assert!(report.warnings.iter().any(|w| w.contains("unknown library kind")));
    }

    #[test]
    fn scripted_engine_requires_command() {
        let (_dir, mut config) = config_with("module top(input clk, input rst_n); endmodule", "top");
        config.engine = EngineConfig { kind: EngineKind::Vcformal, command: None, ..EngineConfig::default() };
        let report = run_doctor(&config);
        assert!(report.errors.iter().any(|e| e.contains("engine.command")));
    }

    #[test]
    fn command_llm_backend_requires_command() {
        let (_dir, mut config) = config_with("module top(input clk, input rst_n); endmodule", "top");
        config.llm = LlmConfig { backend: LlmBackendKind::Command, model: None, command: None };
        let report = run_doctor(&config);
        assert!(report.errors.iter().any(|e| e.contains("llm.command")));
    }

    #[test]
    fn running_twice_is_byte_identical() {
        let (_dir, mut config) = config_with("module top(input clk, input rst_n); endmodule", "top");
        config.libraries.push(LibraryPattern::Handshake(formalchip_synthesis::HandshakeOptions {
            req: "clk".to_string(),
            ack: "rst_n".to_string(),
            bound: 8,
        }));
        let first = serde_json::to_string(&run_doctor(&config)).unwrap();
        let second = serde_json::to_string(&run_doctor(&config)).unwrap();
        assert_eq!(first, second);
    }
}
