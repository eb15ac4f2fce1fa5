//! Argv-only subprocess execution with a hard wall-clock timeout.
//!
//! # Security
//!
//! All process execution in this codebase goes through [`CommandSpec`] to
//! ensure argv-style invocation. Arguments are passed as discrete elements;
//! no shell string (`sh -c`, `cmd /C`) is ever built from candidate, config,
//! or engine-log data. This prevents shell injection when an engine
//! `command` string or an LLM backend `command` string originates from a
//! config file the operator controls but an adapter still must not
//! re-interpret as shell syntax.

use crate::error::RunnerError;
use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A command to execute, built only from discrete argv elements.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
    pub env: HashMap<OsString, OsString>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: HashMap::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<OsString>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        cmd
    }

    fn program_display(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// Split a command string into argv elements the way a POSIX shell word-splitter
/// would, honoring single and double quotes and backslash escapes inside double
/// quotes. Used for config-supplied `command` strings (LLM/engine adapters) that
/// must still never reach an actual shell.
#[must_use]
pub fn split_command_line(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = input.chars().peekable();
    let mut has_content = false;

    while let Some(c) = chars.next() {
        match c {
            '\'' if !in_double => {
                in_single = !in_single;
                has_content = true;
            }
            '"' if !in_single => {
                in_double = !in_double;
                has_content = true;
            }
            '\\' if in_double => {
                if let Some(&next) = chars.peek() {
                    if next == '"' || next == '\\' || next == '$' {
                        current.push(chars.next().unwrap());
                    } else {
                        current.push('\\');
                    }
                } else {
                    current.push('\\');
                }
                has_content = true;
            }
            '\\' if !in_single && !in_double => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    has_content = true;
                }
            }
            c if c.is_whitespace() && !in_single && !in_double => {
                if has_content {
                    words.push(std::mem::take(&mut current));
                    has_content = false;
                }
            }
            c => {
                current.push(c);
                has_content = true;
            }
        }
    }
    if has_content {
        words.push(current);
    }
    words
}

/// Output from a process execution.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<i32>,
    pub timed_out: bool,
}

impl ProcessOutput {
    #[must_use]
    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    #[must_use]
    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0) && !self.timed_out
    }
}

/// Execute a command synchronously, enforcing a wall-clock timeout.
///
/// Captures combined stdout/stderr separately (not interleaved). On timeout
/// the child is killed and `timed_out=true` with `exit_code=None` is
/// returned rather than an error, so callers can decide whether a timeout
/// constitutes `status=error` (engine adapters) or a hard failure (LLM
/// command backend).
pub fn run_with_timeout(
    cmd: &CommandSpec,
    stdin_data: Option<&[u8]>,
    timeout: Duration,
) -> Result<ProcessOutput, RunnerError> {
    let mut child = cmd
        .to_command()
        .stdin(if stdin_data.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| RunnerError::SpawnFailed {
            program: cmd.program_display(),
            reason: e.to_string(),
        })?;

    if let Some(data) = stdin_data {
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(data)
                .map_err(|e| RunnerError::StdinWriteFailed {
                    program: cmd.program_display(),
                    reason: e.to_string(),
                })?;
        }
    }
    drop(child.stdin.take());

    let start = Instant::now();
    let poll_interval = Duration::from_millis(25);
    let status = loop {
        match child.try_wait().map_err(|e| RunnerError::WaitFailed {
            program: cmd.program_display(),
            reason: e.to_string(),
        })? {
            Some(status) => break Some(status),
            None => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    break None;
                }
                std::thread::sleep(poll_interval);
            }
        }
    };

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    if let Some(mut out) = child.stdout.take() {
        use std::io::Read;
        let _ = out.read_to_end(&mut stdout);
    }
    if let Some(mut err) = child.stderr.take() {
        use std::io::Read;
        let _ = err.read_to_end(&mut stderr);
    }

    match status {
        Some(status) => Ok(ProcessOutput {
            stdout,
            stderr,
            exit_code: status.code(),
            timed_out: false,
        }),
        None => Ok(ProcessOutput {
            stdout,
            stderr,
            exit_code: None,
            timed_out: true,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_command_line_handles_simple_words() {
        assert_eq!(
            split_command_line("echo hello world"),
            vec!["echo", "hello", "world"]
        );
    }

    #[test]
    fn split_command_line_handles_double_quotes() {
        assert_eq!(
            split_command_line("my-tool \"arg with spaces\" --flag"),
            vec!["my-tool", "arg with spaces", "--flag"]
        );
    }

    #[test]
    fn split_command_line_handles_single_quotes() {
        assert_eq!(
            split_command_line("tool 'arg with spaces'"),
            vec!["tool", "arg with spaces"]
        );
    }

    #[test]
    fn split_command_line_handles_escaped_quote_in_double_quotes() {
        assert_eq!(
            split_command_line(r#"tool "say \"hi\"""#),
            vec!["tool", "say \"hi\""]
        );
    }

    #[test]
    fn run_with_timeout_captures_stdout() {
        let cmd = CommandSpec::new("printf").arg("hello");
        let output = run_with_timeout(&cmd, None, Duration::from_secs(5)).unwrap();
        assert_eq!(output.stdout_string(), "hello");
        assert!(output.success());
    }

    #[test]
    fn run_with_timeout_reports_nonzero_exit() {
        let cmd = CommandSpec::new("sh").arg("-c").arg("exit 3");
        let output = run_with_timeout(&cmd, None, Duration::from_secs(5)).unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[test]
    fn run_with_timeout_kills_on_expiry() {
        let cmd = CommandSpec::new("sleep").arg("30");
        let output = run_with_timeout(&cmd, None, Duration::from_millis(100)).unwrap();
        assert!(output.timed_out);
        assert_eq!(output.exit_code, None);
    }

    #[test]
    fn run_with_timeout_pipes_stdin() {
        let cmd = CommandSpec::new("cat");
        let output = run_with_timeout(&cmd, Some(b"piped data"), Duration::from_secs(5)).unwrap();
        assert_eq!(output.stdout_string(), "piped data");
    }

    #[test]
    fn spawn_failure_surfaces_typed_error() {
        let cmd = CommandSpec::new("definitely-not-a-real-binary-xyz");
        let result = run_with_timeout(&cmd, None, Duration::from_secs(1));
        assert!(matches!(result, Err(RunnerError::SpawnFailed { .. })));
    }
}
