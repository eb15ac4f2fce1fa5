//! SHA-256 hashing for the evidence manifest.
//!
//! The evidence pack is required to be content-addressed with SHA-256
//! (not the faster `blake3` used elsewhere in this codebase's receipt
//! layer) so that manifests stay verifiable with stock tooling.

use anyhow::{Context, Result};
use camino::Utf8Path;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};

const CHUNK_SIZE: usize = 1024 * 1024;

/// Stream-hash a file's contents, returning the lowercase hex digest.
pub fn sha256_file(path: &Utf8Path) -> Result<String> {
    let file =
        File::open(path.as_std_path()).with_context(|| format!("failed to open: {path}"))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = vec![0_u8; CHUNK_SIZE];
    loop {
        let read = reader
            .read(&mut buf)
            .with_context(|| format!("failed to read: {path}"))?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hash an in-memory buffer, returning the lowercase hex digest.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let mut out = String::with_capacity(bytes.as_ref().len() * 2);
        for b in bytes.as_ref() {
            out.push_str(&format!("{b:02x}"));
        }
        out
    }
}
