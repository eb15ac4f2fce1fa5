//! `formalchip doctor`: run preflight checks and print a human-readable
//! report.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;

use crate::exit_codes::codes;

pub fn run(config_path: Utf8PathBuf) -> Result<i32> {
    let config = formalchip_config::load_config(&config_path).context("load config")?;
    let report = formalchip_doctor::run_doctor(&config);

    for info in &report.infos {
        println!("info: {info}");
    }
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    for error in &report.errors {
        println!("error: {error}");
    }
    println!(
        "{} candidates, {} placeholders, {} errors, {} warnings",
        report.candidate_count,
        report.placeholder_count,
        report.errors.len(),
        report.warnings.len(),
    );

    Ok(if report.ok() { codes::SUCCESS } else { codes::CHECK_FAILED })
}
