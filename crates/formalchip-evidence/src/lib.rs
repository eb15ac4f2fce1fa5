//! Evidence pack: a content-addressed manifest plus a gzip-tar of the run
//! directory, written under `run_dir/evidence/`.

pub mod archive;
pub mod error;
pub mod manifest;
pub mod model;
pub mod walk;

pub use error::EvidenceError;
pub use manifest::build_manifest;
pub use model::{EvidencePaths, FileEntry, Manifest};

use std::collections::BTreeMap;

use camino::Utf8Path;
use formalchip_report::GateVerdict;
use formalchip_utils::atomic_write::write_file_atomic;

use archive::write_tarball;

/// Build the full evidence pack for `run_id`: `evidence/manifest.json` and
/// `evidence/formalchip-evidence-<run_id>.tar.gz`.
pub fn build_evidence_pack(
    run_dir: &Utf8Path,
    run_id: &str,
    config_path: &Utf8Path,
    tool_versions: BTreeMap<String, String>,
    gate: GateVerdict,
) -> Result<EvidencePaths, EvidenceError> {
    let tarball = run_dir.join("evidence").join(format!("formalchip-evidence-{run_id}.tar.gz"));

    let manifest = build_manifest(run_dir, config_path, &tarball, tool_versions, gate)?;
    let manifest_json = run_dir.join("evidence").join("manifest.json");
    let body = serde_json::to_string_pretty(&manifest)?;
    write_file_atomic(&manifest_json, &body).map_err(|e| EvidenceError::WriteFailed {
        path: manifest_json.to_string(),
        reason: e.to_string(),
    })?;

    write_tarball(run_dir, &tarball)?;

    Ok(EvidencePaths { manifest_json, tarball })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use formalchip_report::GateCheck;

    fn verdict() -> GateVerdict {
        GateVerdict {
            passed: true,
            checks: vec![GateCheck { name: "run_completed".to_string(), passed: true, detail: String::new() }],
        }
    }

    #[test]
    fn builds_manifest_and_tarball_naming_the_run_id() {
        let run_dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(run_dir.path().to_path_buf()).unwrap();
        std::fs::write(run_dir.join("state.json"), "{\"run_id\":\"r1\"}").unwrap();

        let config = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(config.path(), "[project]\nname=\"x\"").unwrap();
        let config_path = Utf8PathBuf::from_path_buf(config.path().to_path_buf()).unwrap();

        let paths = build_evidence_pack(&run_dir, "r1", &config_path, BTreeMap::new(), verdict()).unwrap();
        assert!(paths.manifest_json.exists());
        assert!(paths.tarball.exists());
        assert_eq!(paths.tarball.file_name(), Some("formalchip-evidence-r1.tar.gz"));

        let manifest_text = std::fs::read_to_string(paths.manifest_json.as_std_path()).unwrap();
        assert!(!manifest_text.contains("formalchip-evidence-r1.tar.gz"));
    }

    #[test]
    fn rebuilding_over_the_same_run_dir_is_idempotent_apart_from_generated_at() {
        let run_dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(run_dir.path().to_path_buf()).unwrap();
        std::fs::write(run_dir.join("state.json"), "{}").unwrap();
        let config = tempfile::NamedTempFile::new().unwrap();
        let config_path = Utf8PathBuf::from_path_buf(config.path().to_path_buf()).unwrap();

        build_evidence_pack(&run_dir, "r1", &config_path, BTreeMap::new(), verdict()).unwrap();
        let first: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(run_dir.join("evidence/manifest.json")).unwrap(),
        )
        .unwrap();

        build_evidence_pack(&run_dir, "r1", &config_path, BTreeMap::new(), verdict()).unwrap();
        let second: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(run_dir.join("evidence/manifest.json")).unwrap(),
        )
        .unwrap();

        let mut first_sans_ts = first.clone();
        let mut second_sans_ts = second.clone();
        first_sans_ts["generated_at"] = serde_json::Value::Null;
        second_sans_ts["generated_at"] = serde_json::Value::Null;
        assert_eq!(first_sans_ts, second_sans_ts);
    }
}
