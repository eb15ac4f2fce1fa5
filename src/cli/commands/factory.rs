//! Builds the boxed `LlmBackend`/`FormalEngine` trait objects a resolved
//! config calls for.

use std::time::Duration;

use anyhow::{Context, Result};

use formalchip_config::{EngineKind, FormalChipConfig, LlmBackendKind};
use formalchip_engine::{FormalEngine, MockEngine, ScriptedEngine, SymbiYosysEngine};
use formalchip_llm::{CommandLlm, DeterministicLlm, LlmBackend};

pub fn build_llm(config: &FormalChipConfig) -> Result<Box<dyn LlmBackend>> {
    match config.llm.backend {
        LlmBackendKind::Deterministic => Ok(Box::new(DeterministicLlm)),
        LlmBackendKind::Command => {
            let command = config
                .llm
                .command
                .clone()
                .context("llm.command is required when llm.backend = \"command\"")?;
            Ok(Box::new(CommandLlm::new(command, Duration::from_secs(config.engine.timeout_s))))
        }
    }
}

pub fn build_engine(config: &FormalChipConfig) -> Result<Box<dyn FormalEngine>> {
    match config.engine.kind {
        EngineKind::Mock => Ok(Box::new(MockEngine::new(config.engine.pass_after))),
        EngineKind::Symbiyosys => {
            let template = match &config.engine.sby_file {
                Some(path) => Some(
                    std::fs::read_to_string(path.as_std_path())
                        .with_context(|| format!("read engine.sby_file at {path}"))?,
                ),
                None => None,
            };
            Ok(Box::new(SymbiYosysEngine::new("sby", template)))
        }
        EngineKind::Vcformal | EngineKind::Jasper | EngineKind::Questa => {
            let command = config
                .engine
                .command
                .clone()
                .with_context(|| format!("engine.command is required for engine.kind = {:?}", config.engine.kind))?;
            let name = format!("{:?}", config.engine.kind).to_ascii_lowercase();
            Ok(Box::new(ScriptedEngine::new(name, command)))
        }
    }
}
