//! Deterministic recursive walk of a run directory, for the evidence manifest
//! file list and the tarball contents.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::EvidenceError;

/// Every regular file under `dir`, recursively, sorted by path.
pub fn collect_files(dir: &Utf8Path) -> Result<Vec<Utf8PathBuf>, EvidenceError> {
    let mut out = Vec::new();
    walk(dir, &mut out)?;
    out.sort();
    Ok(out)
}

/// Same as [`collect_files`], but omitting `exclude` (the evidence tarball
/// itself, which must not include or describe itself).
pub fn collect_files_excluding(dir: &Utf8Path, exclude: &Utf8Path) -> Result<Vec<Utf8PathBuf>, EvidenceError> {
    Ok(collect_files(dir)?.into_iter().filter(|p| p != exclude).collect())
}

fn walk(dir: &Utf8Path, out: &mut Vec<Utf8PathBuf>) -> Result<(), EvidenceError> {
    let read_dir = std::fs::read_dir(dir.as_std_path()).map_err(|e| EvidenceError::ReadFailed {
        path: dir.to_string(),
        reason: e.to_string(),
    })?;

    for entry in read_dir {
        let entry = entry.map_err(|e| EvidenceError::ReadFailed {
            path: dir.to_string(),
            reason: e.to_string(),
        })?;
        let path = Utf8PathBuf::from_path_buf(entry.path())
            .map_err(|p| EvidenceError::NonUtf8Path { path: p.display().to_string() })?;
        let file_type = entry.file_type().map_err(|e| EvidenceError::ReadFailed {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        if file_type.is_dir() {
            walk(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_nested_directories_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        std::fs::create_dir_all(root.join("a/b")).unwrap();
        std::fs::write(root.join("a/b/two.txt"), "2").unwrap();
        std::fs::write(root.join("a/one.txt"), "1").unwrap();

        let files = collect_files(root).unwrap();
        let relative: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string())
            .collect();
        assert_eq!(relative, vec!["a/b/two.txt".to_string(), "a/one.txt".to_string()]);
    }

    #[test]
    fn empty_directory_yields_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        assert!(collect_files(root).unwrap().is_empty());
    }
}
