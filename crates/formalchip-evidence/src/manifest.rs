//! Builds the evidence manifest from a run directory's current contents.

use std::collections::BTreeMap;

use camino::Utf8Path;
use formalchip_report::GateVerdict;
use formalchip_utils::hash::sha256_file;
use formalchip_utils::ids::utc_now_iso;
use formalchip_utils::runtime_facts::gather_runtime_facts;

use crate::error::EvidenceError;
use crate::model::{FileEntry, Manifest};
use crate::walk::collect_files_excluding;

/// Build the manifest for `run_dir`, hashing every file currently present
/// except `tarball_path` (the evidence tarball describes the manifest, not
/// the other way around).
pub fn build_manifest(
    run_dir: &Utf8Path,
    config_path: &Utf8Path,
    tarball_path: &Utf8Path,
    tool_versions: BTreeMap<String, String>,
    gate: GateVerdict,
) -> Result<Manifest, EvidenceError> {
    let config_sha256 = sha256_file(config_path)?;

    let mut files = Vec::new();
    for path in collect_files_excluding(run_dir, tarball_path)? {
        let metadata = std::fs::metadata(path.as_std_path()).map_err(|e| EvidenceError::ReadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let relative = path
            .strip_prefix(run_dir)
            .unwrap_or_else(|_| path.as_path())
            .to_string();
        files.push(FileEntry {
            path: relative,
            sha256: sha256_file(&path)?,
            size: metadata.len(),
        });
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));

    Ok(Manifest {
        generated_at: utc_now_iso(),
        run_dir: run_dir.to_string(),
        config_path: config_path.to_string(),
        config_sha256,
        tool_versions,
        runtime: gather_runtime_facts(),
        gate,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use formalchip_report::{GateCheck, GateVerdict};

    fn verdict() -> GateVerdict {
        GateVerdict {
            passed: true,
            checks: vec![GateCheck { name: "run_completed".to_string(), passed: true, detail: String::new() }],
        }
    }

    #[test]
    fn lists_every_file_with_hash_and_size() {
        let run_dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(run_dir.path().to_path_buf()).unwrap();
        std::fs::write(run_dir.join("state.json"), "{}").unwrap();
        std::fs::create_dir_all(run_dir.join("iter_01")).unwrap();
        std::fs::write(run_dir.join("iter_01/properties.sv"), "property p1; endproperty").unwrap();

        let config = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(config.path(), "[project]\nname=\"x\"").unwrap();
        let config_path = Utf8PathBuf::from_path_buf(config.path().to_path_buf()).unwrap();

        let tarball = run_dir.join("evidence/pack.tar.gz");
        let manifest = build_manifest(&run_dir, &config_path, &tarball, BTreeMap::new(), verdict()).unwrap();
        assert_eq!(manifest.files.len(), 2);
        assert!(manifest.files.iter().any(|f| f.path == "state.json"));
        assert!(manifest.files.iter().all(|f| f.sha256.len() == 64));
        assert!(!manifest.config_sha256.is_empty());
    }

    #[test]
    fn excludes_the_tarball_path_from_the_file_list() {
        let run_dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(run_dir.path().to_path_buf()).unwrap();
        std::fs::write(run_dir.join("state.json"), "{}").unwrap();
        std::fs::create_dir_all(run_dir.join("evidence")).unwrap();
        let tarball = run_dir.join("evidence/pack.tar.gz");
        std::fs::write(&tarball, "stale tarball bytes").unwrap();

        let config = tempfile::NamedTempFile::new().unwrap();
        let config_path = Utf8PathBuf::from_path_buf(config.path().to_path_buf()).unwrap();

        let manifest = build_manifest(&run_dir, &config_path, &tarball, BTreeMap::new(), verdict()).unwrap();
        assert_eq!(manifest.files.len(), 1);
        assert_eq!(manifest.files[0].path, "state.json");
    }
}
