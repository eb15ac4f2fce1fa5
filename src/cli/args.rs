//! The `clap`-derived command surface: `run`, `doctor`, `evaluate-gate`,
//! `export-template`.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Fmt,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "formalchip", version, about = "SVA property synthesis and bounded propose/prove/repair loop")]
pub struct Cli {
    /// Log output format: human-readable `fmt` or structured `json`.
    #[arg(long, global = true, value_enum, default_value = "fmt")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the propose/prove/repair loop to a terminal state, then write
    /// the report, KPI report, and evidence pack.
    Run {
        #[arg(long)]
        config: Utf8PathBuf,

        /// Override `[loop].max_iterations` from the config file.
        #[arg(long)]
        max_iterations: Option<u32>,
    },

    /// Run preflight checks against a config without starting a loop.
    Doctor {
        #[arg(long)]
        config: Utf8PathBuf,
    },

    /// Recompute the KPI report and gate verdict for an existing run.
    EvaluateGate {
        #[arg(long)]
        run_dir: Utf8PathBuf,

        #[arg(long)]
        config: Utf8PathBuf,

        /// Overrides `[kpi].baseline_csv` from the config file.
        #[arg(long)]
        baseline_csv: Option<Utf8PathBuf>,

        /// Where to write `kpi.json`. Defaults to `<run_dir>/report/kpi.json`.
        #[arg(long)]
        out: Option<Utf8PathBuf>,
    },

    /// Write a starter engine template (currently `symbiyosys`'s `.sby`) to
    /// `--out`, for projects that want to hand-tune it before pointing
    /// `[engine].sby_file` at the result.
    ExportTemplate {
        #[arg(long, value_enum)]
        engine: TemplateEngine,

        #[arg(long)]
        out: Utf8PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateEngine {
    Symbiyosys,
}
