//! Structural validation and path resolution: the second pass after
//! decoding succeeds, turning a [`RawConfig`] into a [`FormalChipConfig`]
//! with only absolute/normalised paths left in it.

use crate::error::ConfigError;
use crate::model::{EngineKind, FormalChipConfig, LlmBackendKind, RawConfig};
use camino::{Utf8Path, Utf8PathBuf};

const KNOWN_SPEC_KINDS: &[&str] = &["text", "register_csv", "ipxact", "rule_table_csv"];

fn resolve_against(dir: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}

/// Validate and path-resolve a decoded config. `config_path` is used both
/// to record `config_path` on the result and as the base directory every
/// relative path resolves against.
pub fn resolve(raw: RawConfig, config_path: &Utf8Path) -> Result<FormalChipConfig, ConfigError> {
    let config_dir = config_path.parent().unwrap_or_else(|| Utf8Path::new("."));

    let mut project = raw.project.ok_or_else(|| ConfigError::Invalid {
        reason: "missing required [project] section".to_string(),
    })?;

    if project.name.trim().is_empty() {
        return Err(ConfigError::Invalid {
            reason: "project.name must not be empty".to_string(),
        });
    }
    if project.rtl_files.is_empty() {
        return Err(ConfigError::Invalid {
            reason: "project.rtl_files must list at least one RTL file".to_string(),
        });
    }
    if project.top_module.trim().is_empty() {
        return Err(ConfigError::Invalid {
            reason: "project.top_module must not be empty".to_string(),
        });
    }
    project.rtl_files = project
        .rtl_files
        .iter()
        .map(|p| resolve_against(config_dir, p))
        .collect();

    let mut engine = raw.engine;
    if engine.kind == EngineKind::Symbiyosys {
        engine.sby_file = engine.sby_file.map(|p| resolve_against(config_dir, &p));
    }
    if engine.kind.is_scripted() && engine.command.as_deref().unwrap_or("").trim().is_empty() {
        return Err(ConfigError::Invalid {
            reason: format!("engine.command is required for engine.kind = {:?}", engine.kind),
        });
    }

    let llm = raw.llm;
    if llm.backend == LlmBackendKind::Command
        && llm.command.as_deref().unwrap_or("").trim().is_empty()
    {
        return Err(ConfigError::Invalid {
            reason: "llm.command is required when llm.backend = \"command\"".to_string(),
        });
    }

    let mut loop_cfg = raw.loop_cfg;
    if loop_cfg.max_iterations == 0 {
        return Err(ConfigError::Invalid {
            reason: "loop.max_iterations must be at least 1".to_string(),
        });
    }
    loop_cfg.workdir = resolve_against(config_dir, &loop_cfg.workdir);

    let mut kpi = raw.kpi;
    kpi.baseline_csv = kpi.baseline_csv.map(|p| resolve_against(config_dir, &p));

    let mut specs = raw.specs;
    for spec in &mut specs {
        if !KNOWN_SPEC_KINDS.contains(&spec.kind.as_str()) {
            return Err(ConfigError::Invalid {
                reason: format!("unsupported spec kind: {}", spec.kind),
            });
        }
        spec.path = resolve_against(config_dir, &spec.path);
    }

    for constraint in raw.constraints.assumptions.iter().chain(raw.constraints.covers.iter()) {
        if constraint.name.trim().is_empty() || constraint.expr.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "every constraints entry requires a non-empty name and expr".to_string(),
            });
        }
    }

    Ok(FormalChipConfig {
        config_path: config_path.to_path_buf(),
        project,
        llm,
        engine,
        loop_cfg,
        constraints: raw.constraints,
        kpi,
        specs,
        libraries: raw.libraries,
    })
}
