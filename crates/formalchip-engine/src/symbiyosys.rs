//! The SymbiYosys adapter: generates (or fills in) a `.sby` file, invokes
//! the `sby` driver, and harvests witness artifacts from the iteration dir.

use std::fs;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::EngineError;
use crate::model::{EngineRunInput, FormalEngine};
use formalchip_runstate::IterationFeedback;
use formalchip_runstate::Status;
use formalchip_utils::atomic_write::write_file_atomic;
use formalchip_utils::runner::{run_with_timeout, CommandSpec};
use formalchip_utils::runtime_facts::which_or_none;

const WITNESS_EXTENSIONS: &[&str] = &["vcd", "yw", "aiw", "cex", "json", "smtc", "txt"];
const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SymbiYosysEngine {
    binary: String,
    template: Option<String>,
}

impl SymbiYosysEngine {
    #[must_use]
    pub fn new(binary: impl Into<String>, template: Option<String>) -> Self {
        SymbiYosysEngine {
            binary: binary.into(),
            template,
        }
    }

    fn render_sby(&self, input: &EngineRunInput<'_>) -> String {
        let rtl_files = input
            .rtl_files
            .iter()
            .map(Utf8PathBuf::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        if let Some(template) = &self.template {
            return template
                .replace("{{TOP_MODULE}}", &input.top_module)
                .replace("{{PROPERTY_FILE}}", input.property_file.as_str())
                .replace("{{RTL_FILES}}", &rtl_files);
        }

        format!(
            "[options]\nmode prove\ndepth 20\n\n[engines]\nsmtbmc\n\n[script]\nread -formal {rtl_files} {props}\nprep -top {top}\n\n[files]\n{rtl_files}\n{props}\n",
            rtl_files = rtl_files,
            props = input.property_file,
            top = input.top_module,
        )
    }

    fn harvest_witnesses(&self, iteration_dir: &Utf8Path) -> Result<Vec<String>, EngineError> {
        let mut candidates = Vec::new();
        collect_witness_candidates(iteration_dir, iteration_dir, &mut candidates)?;

        let witnesses_dir = iteration_dir.join("artifacts").join("witnesses");
        let mut copied = Vec::new();
        for rel in candidates {
            let src = iteration_dir.join(&rel);
            let dest = witnesses_dir.join(&rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| EngineError::WriteFailed {
                    path: parent.to_string(),
                    reason: e.to_string(),
                })?;
            }
            fs::copy(src.as_std_path(), dest.as_std_path()).map_err(|e| EngineError::WriteFailed {
                path: dest.to_string(),
                reason: e.to_string(),
            })?;
            copied.push(format!("artifacts/witnesses/{rel}"));
        }
        Ok(copied)
    }
}

fn is_witness_candidate(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    if lower.contains("trace") || lower.contains("witness") {
        return true;
    }
    WITNESS_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

fn collect_witness_candidates(
    root: &Utf8Path,
    dir: &Utf8Path,
    out: &mut Vec<String>,
) -> Result<(), EngineError> {
    if dir.file_name() == Some("artifacts") {
        return Ok(());
    }
    let entries = fs::read_dir(dir.as_std_path()).map_err(|e| EngineError::ReadFailed {
        path: dir.to_string(),
        reason: e.to_string(),
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| EngineError::ReadFailed {
            path: dir.to_string(),
            reason: e.to_string(),
        })?;
        let path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|p| EngineError::ReadFailed {
                path: p.display().to_string(),
                reason: "non-utf8 path".to_string(),
            })?;
        let file_type = entry.file_type().map_err(|e| EngineError::ReadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        if file_type.is_dir() {
            collect_witness_candidates(root, &path, out)?;
        } else if let Some(name) = path.file_name() {
            if is_witness_candidate(name) {
                let rel = path.strip_prefix(root).unwrap_or(&path);
                out.push(rel.to_string());
            }
        }
    }
    Ok(())
}

impl FormalEngine for SymbiYosysEngine {
    fn name(&self) -> &str {
        "symbiyosys"
    }

    fn tool_version(&self) -> String {
        if which_or_none(&self.binary).is_none() {
            return "unavailable".to_string();
        }
        let cmd = CommandSpec::new(self.binary.as_str()).arg("--version");
        match run_with_timeout(&cmd, None, VERSION_PROBE_TIMEOUT) {
            Ok(output) if output.success() => output.stdout_string().trim().to_string(),
            _ => "unavailable".to_string(),
        }
    }

    fn run(&self, input: &EngineRunInput<'_>) -> Result<IterationFeedback, EngineError> {
        let sby_content = self.render_sby(input);
        let sby_path = input.iteration_dir.join("run.sby");
        write_file_atomic(&sby_path, &sby_content).map_err(|e| EngineError::WriteFailed {
            path: sby_path.to_string(),
            reason: e.to_string(),
        })?;

        let cmd = CommandSpec::new(self.binary.as_str())
            .arg("-f")
            .arg("run.sby")
            .cwd(input.iteration_dir.as_std_path());
        let output = run_with_timeout(&cmd, None, input.timeout)?;

        let mut log = output.stdout_string();
        log.push_str(&output.stderr_string());
        let log_path = input.iteration_dir.join("engine.log");
        write_file_atomic(&log_path, &log).map_err(|e| EngineError::WriteFailed {
            path: log_path.to_string(),
            reason: e.to_string(),
        })?;

        let mut feedback = formalchip_logparse::parse_engine_log(&log);
        if !output.success() && feedback.status == Status::Unknown {
            feedback.status = Status::Error;
            feedback.summary = format!(
                "sby exited non-zero ({:?}) with no recognisable status marker",
                output.exit_code
            );
        }
        feedback.artifact_files = self.harvest_witnesses(&input.iteration_dir)?;
        Ok(feedback)
    }
}
