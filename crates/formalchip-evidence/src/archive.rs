//! Gzip-tar archive of a run directory, written alongside its manifest.

use std::fs::File;

use camino::Utf8Path;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::EvidenceError;
use crate::walk::collect_files_excluding;

/// Tar+gzip every file currently under `run_dir` (except `tarball_path`
/// itself) into `tarball_path`, with entry names relative to `run_dir`.
///
/// The file list is gathered before the output file is created, since
/// `File::create` truncates in place and `tarball_path` commonly lives
/// inside `run_dir`.
pub fn write_tarball(run_dir: &Utf8Path, tarball_path: &Utf8Path) -> Result<(), EvidenceError> {
    let entries = collect_files_excluding(run_dir, tarball_path)?;

    if let Some(parent) = tarball_path.parent() {
        std::fs::create_dir_all(parent.as_std_path()).map_err(|e| EvidenceError::WriteFailed {
            path: parent.to_string(),
            reason: e.to_string(),
        })?;
    }

    let file = File::create(tarball_path.as_std_path()).map_err(|e| EvidenceError::WriteFailed {
        path: tarball_path.to_string(),
        reason: e.to_string(),
    })?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for path in entries {
        let relative = path.strip_prefix(run_dir).unwrap_or(&path);
        builder
            .append_path_with_name(path.as_std_path(), relative.as_std_path())
            .map_err(|e| EvidenceError::WriteFailed {
                path: tarball_path.to_string(),
                reason: e.to_string(),
            })?;
    }

    builder.into_inner().and_then(|enc| enc.finish()).map_err(|e| EvidenceError::WriteFailed {
        path: tarball_path.to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::io::Read;

    #[test]
    fn tarball_contains_every_run_dir_file_with_relative_names() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(run_dir.join("state.json"), "{}").unwrap();
        std::fs::create_dir_all(run_dir.join("iter_01")).unwrap();
        std::fs::write(run_dir.join("iter_01/properties.sv"), "x").unwrap();

        let tarball = run_dir.join("evidence/pack.tar.gz");
        write_tarball(&run_dir, &tarball).unwrap();
        assert!(tarball.exists());

        let file = File::open(tarball.as_std_path()).unwrap();
        let decoder = flate2::read::GzDecoder::new(file);
        let mut archive = tar::Archive::new(decoder);
        let mut names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| {
                let e = e.unwrap();
                e.path().unwrap().to_string_lossy().into_owned()
            })
            .collect();
        names.sort();
        assert_eq!(names, vec!["iter_01/properties.sv".to_string(), "state.json".to_string()]);
    }

    #[test]
    fn tarball_excludes_itself_even_when_rebuilt_into_same_directory() {
        let dir = tempfile::tempdir().unwrap();
        let run_dir = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        std::fs::write(run_dir.join("a.txt"), "a").unwrap();
        let tarball = run_dir.join("evidence/pack.tar.gz");

        write_tarball(&run_dir, &tarball).unwrap();
        let first_len = std::fs::metadata(tarball.as_std_path()).unwrap().len();

        write_tarball(&run_dir, &tarball).unwrap();
        let file = File::open(tarball.as_std_path()).unwrap();
        let decoder = flate2::read::GzDecoder::new(file);
        let mut archive = tar::Archive::new(decoder);
        let count = archive.entries().unwrap().count();
        assert_eq!(count, 1);
        assert!(first_len > 0);
    }
}
