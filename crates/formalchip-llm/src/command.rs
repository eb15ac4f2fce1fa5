//! The command backend: serialises a propose/repair request as JSON to a
//! subprocess's stdin and expects `{"candidates": [...]}` on stdout.

use crate::backend::LlmBackend;
use crate::error::LlmError;
use formalchip_clauses::SpecClause;
use formalchip_runstate::IterationFeedback;
use formalchip_synthesis::{LibraryPattern, PropertyCandidate, SynthesisInputs};
use formalchip_utils::runner::{run_with_timeout, split_command_line, CommandSpec};
use serde::Serialize;
use std::time::Duration;

pub struct CommandLlm {
    command: String,
    timeout: Duration,
}

impl CommandLlm {
    #[must_use]
    pub fn new(command: String, timeout: Duration) -> Self {
        CommandLlm { command, timeout }
    }

    fn invoke(&self, request: &LlmRequest) -> Result<Vec<PropertyCandidate>, LlmError> {
        let argv = split_command_line(&self.command);
        let Some((program, args)) = argv.split_first() else {
            return Err(LlmError::MalformedResponse {
                reason: "command backend has an empty command string".to_string(),
            });
        };
        let spec = CommandSpec::new(program.as_str()).args(args.iter().map(String::as_str));

        let payload = serde_json::to_vec(request).map_err(|e| LlmError::MalformedResponse {
            reason: format!("failed to serialise request: {e}"),
        })?;

        let output = run_with_timeout(&spec, Some(&payload), self.timeout)?;

        if output.timed_out {
            return Err(LlmError::Timeout {
                program: program.clone(),
                timeout_seconds: self.timeout.as_secs(),
            });
        }
        if !output.success() {
            return Err(LlmError::CommandFailed {
                program: program.clone(),
                exit_code: output.exit_code,
                stderr: output.stderr_string(),
            });
        }

        let response: LlmResponse =
            serde_json::from_slice(&output.stdout).map_err(|e| LlmError::MalformedResponse {
                reason: format!("could not parse stdout as {{candidates: [...]}}: {e}"),
            })?;
        Ok(response.candidates)
    }
}

#[derive(Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum LlmRequest<'a> {
    Propose {
        clauses: &'a [SpecClause],
        libraries: &'a [LibraryPattern],
        synthesis_inputs: &'a SynthesisInputs,
    },
    Repair {
        current: &'a [PropertyCandidate],
        feedback: &'a IterationFeedback,
        clauses: &'a [SpecClause],
        libraries: &'a [LibraryPattern],
        synthesis_inputs: &'a SynthesisInputs,
    },
}

#[derive(serde::Deserialize)]
struct LlmResponse {
    candidates: Vec<PropertyCandidate>,
}

impl LlmBackend for CommandLlm {
    fn propose(
        &self,
        clauses: &[SpecClause],
        libraries: &[LibraryPattern],
        inputs: &SynthesisInputs,
    ) -> Result<Vec<PropertyCandidate>, LlmError> {
        self.invoke(&LlmRequest::Propose {
            clauses,
            libraries,
            synthesis_inputs: inputs,
        })
    }

    fn repair(
        &self,
        current: &[PropertyCandidate],
        feedback: &IterationFeedback,
        clauses: &[SpecClause],
        libraries: &[LibraryPattern],
        inputs: &SynthesisInputs,
    ) -> Result<Vec<PropertyCandidate>, LlmError> {
        self.invoke(&LlmRequest::Repair {
            current,
            feedback,
            clauses,
            libraries,
            synthesis_inputs: inputs,
        })
    }
}
