//! The scripted adapter: drives a vendor formal tool (`vcformal`, `jasper`,
//! `questa`, ...) as an opaque, env-configured subprocess.

use std::time::Duration;

use formalchip_utils::runner::{run_with_timeout, split_command_line, CommandSpec};
use formalchip_utils::runtime_facts::which_or_none;

use crate::error::EngineError;
use crate::model::{EngineRunInput, FormalEngine};
use formalchip_runstate::{IterationFeedback, Status};
use formalchip_utils::atomic_write::write_file_atomic;

const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// The OS path-*list* separator (`:` on Unix, `;` on Windows) — distinct
/// from `MAIN_SEPARATOR`, which separates path *components* and would
/// mangle a list of RTL files into a single unsplittable token.
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: &str = ":";
#[cfg(windows)]
const PATH_LIST_SEPARATOR: &str = ";";

pub struct ScriptedEngine {
    name: String,
    command: String,
}

impl ScriptedEngine {
    #[must_use]
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        ScriptedEngine {
            name: name.into(),
            command: command.into(),
        }
    }

    fn argv(&self) -> Vec<String> {
        split_command_line(&self.command)
    }
}

impl FormalEngine for ScriptedEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn tool_version(&self) -> String {
        let argv = self.argv();
        let Some(program) = argv.first() else {
            return "unavailable".to_string();
        };
        if which_or_none(program).is_none() {
            return "unavailable".to_string();
        }
        let mut cmd = CommandSpec::new(program.as_str());
        for arg in &argv[1..] {
            cmd = cmd.arg(arg.as_str());
        }
        cmd = cmd.arg("--version");
        match run_with_timeout(&cmd, None, VERSION_PROBE_TIMEOUT) {
            Ok(output) if output.success() => output.stdout_string().trim().to_string(),
            _ => "unavailable".to_string(),
        }
    }

    fn run(&self, input: &EngineRunInput<'_>) -> Result<IterationFeedback, EngineError> {
        let argv = self.argv();
        let program = argv.first().ok_or_else(|| EngineError::WriteFailed {
            path: self.command.clone(),
            reason: "engine command is empty".to_string(),
        })?;

        let rtl_joined = input
            .rtl_files
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(PATH_LIST_SEPARATOR);

        let mut cmd = CommandSpec::new(program.as_str());
        for arg in &argv[1..] {
            cmd = cmd.arg(arg.as_str());
        }
        cmd = cmd
            .cwd(input.iteration_dir.as_std_path())
            .env("FORMALCHIP_PROPERTY_FILE", input.property_file.as_str())
            .env("FORMALCHIP_TOP", input.top_module.as_str())
            .env("FORMALCHIP_RTL_FILES", rtl_joined);

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
                "{} exited non-zero ({:?}) with no recognisable status marker",
                self.name, output.exit_code
            );
        }
        Ok(feedback)
    }
}
