//! Atomic file writes: temp file in the same directory, fsync, rename.
//!
//! Used for every artifact that must never be observed half-written:
//! `state.json`, report JSON, the evidence manifest.

use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use std::io::Write;

use tempfile::NamedTempFile;

/// Atomically write `content` to `path`, creating parent directories as needed.
pub fn write_file_atomic(path: &Utf8Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directory: {parent}"))?;
    }

    let temp_dir = path.parent().unwrap_or_else(|| Utf8Path::new("."));
    let mut temp_file = NamedTempFile::new_in(temp_dir)
        .with_context(|| format!("failed to create temporary file in: {temp_dir}"))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "failed to write content to temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .with_context(|| "failed to fsync temporary file")?;

    temp_file
        .persist(path.as_std_path())
        .map_err(|e| anyhow::anyhow!(e.error))
        .with_context(|| format!("failed to persist atomic write to: {path}"))?;

    Ok(())
}

/// Append a single line to `path`, creating it (and parents) if necessary.
///
/// Not atomic across the whole file by design: the append-only trace log
/// tolerates a torn last line on crash, unlike `state.json`.
pub fn append_line(path: &Utf8Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent directory: {parent}"))?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_std_path())
        .with_context(|| format!("failed to open for append: {path}"))?;
    writeln!(file, "{line}").with_context(|| format!("failed to append to: {path}"))?;
    Ok(())
}
