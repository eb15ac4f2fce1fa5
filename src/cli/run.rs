//! Dispatches a parsed [`Commands`] to its handler and maps the outcome to
//! a process exit code.

use clap::Parser;

use crate::cli::args::{Cli, Commands};
use crate::cli::commands::{doctor_cmd, gate_cmd, run_cmd, template_cmd};
use crate::exit_codes::codes;

/// Parse `std::env::args`, run the requested subcommand, and return the
/// process exit code. Never panics: every failure path is an `anyhow`
/// error printed to stderr and mapped to [`codes::INTERNAL_ERROR`].
pub fn run() -> i32 {
    let cli = Cli::parse();
    crate::logging::init(cli.log_format);

    let result = match cli.command {
        Commands::Run { config, max_iterations } => run_cmd::run(config, max_iterations),
        Commands::Doctor { config } => doctor_cmd::run(config),
        Commands::EvaluateGate { run_dir, config, baseline_csv, out } => {
            gate_cmd::run(run_dir, config, baseline_csv, out)
        }
        Commands::ExportTemplate { engine, out } => template_cmd::run(engine, out),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            codes::INTERNAL_ERROR
        }
    }
}
