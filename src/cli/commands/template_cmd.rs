//! `formalchip export-template`: write a starter engine template that a
//! project can hand-tune before pointing `[engine].sby_file` at it.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;

use crate::cli::args::TemplateEngine;
use crate::exit_codes::codes;

const SYMBIYOSYS_TEMPLATE: &str = "[options]\nmode prove\ndepth 20\n\n[engines]\nsmtbmc\n\n\
[script]\nread -formal {{RTL_FILES}} {{PROPERTY_FILE}}\nprep -top {{TOP_MODULE}}\n\n\
[files]\n{{RTL_FILES}}\n{{PROPERTY_FILE}}\n";

pub fn run(engine: TemplateEngine, out: Utf8PathBuf) -> Result<i32> {
    let body = match engine {
        TemplateEngine::Symbiyosys => SYMBIYOSYS_TEMPLATE,
    };
    formalchip_utils::atomic_write::write_file_atomic(&out, body)
        .with_context(|| format!("write template to {out}"))?;
    println!("template written to {out}");
    Ok(codes::SUCCESS)
}
