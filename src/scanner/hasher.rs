//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! This module provides the [`Hasher`] struct for computing BLAKE3 hashes
//! of file contents using memory-efficient streaming. Files are read in
//! [`BLOCK_SIZE`] chunks so a single large or slow file never holds more
//! than one buffer in memory.
//!
//! The digest is a pure function of content: two files with identical bytes
//! produce identical hashes regardless of path or metadata.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// Fixed-length content digest (BLAKE3, 32 bytes).
pub type Hash = [u8; 32];

/// Read buffer size for streaming hashing (64 KiB).
pub const BLOCK_SIZE: usize = 64 * 1024;

/// Streaming BLAKE3 content hasher.
///
/// # Example
///
/// ```no_run
/// use dupescan::scanner::{hash_to_hex, Hasher};
/// use std::path::Path;
///
/// let hasher = Hasher::new();
/// let digest = hasher.hash_file(Path::new("/some/file")).unwrap();
/// println!("{}", hash_to_hex(&digest));
/// ```
#[derive(Debug, Default)]
pub struct Hasher;

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compute the BLAKE3 hash of a file's full content.
    ///
    /// Reads the file in [`BLOCK_SIZE`] chunks.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] if the file cannot be opened or read
    /// (vanished mid-scan, permission denied, broken symlink). The error
    /// concerns only this file; callers continue with the rest of the scan.
    pub fn hash_file(&self, path: &Path) -> Result<Hash, HashError> {
        let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
        let mut hasher = blake3::Hasher::new();
        let mut buf = vec![0u8; BLOCK_SIZE];

        loop {
            let n = file.read(&mut buf).map_err(|e| HashError::from_io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(*hasher.finalize().as_bytes())
    }

    /// Digest of the empty byte stream, computed without any I/O.
    ///
    /// Used to short-circuit zero-byte files: all same-size files of size 0
    /// are equal by definition, so no read is needed.
    #[must_use]
    pub fn empty_hash() -> Hash {
        *blake3::Hasher::new().finalize().as_bytes()
    }
}

/// Convert a hash to its lowercase hexadecimal representation.
#[must_use]
pub fn hash_to_hex(hash: &Hash) -> String {
    use std::fmt::Write;

    let mut hex = String::with_capacity(64);
    for byte in hash {
        // write! to a String cannot fail
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// Parse a 64-character hexadecimal string back into a hash.
///
/// Returns `None` for strings of the wrong length or with non-hex digits,
/// which callers treat as a cache miss.
#[must_use]
pub fn hex_to_hash(hex: &str) -> Option<Hash> {
    if hex.len() != 64 {
        return None;
    }

    let mut hash = [0u8; 32];
    for (i, chunk) in hex.as_bytes().chunks_exact(2).enumerate() {
        let pair = std::str::from_utf8(chunk).ok()?;
        hash[i] = u8::from_str_radix(pair, 16).ok()?;
    }
    Some(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_hash_identical_content_matches() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.bin", b"duplicate content");
        let b = write_file(&dir, "b.bin", b"duplicate content");

        let hasher = Hasher::new();
        assert_eq!(hasher.hash_file(&a).unwrap(), hasher.hash_file(&b).unwrap());
    }

    #[test]
    fn test_hash_differs_for_different_content() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.bin", b"foo");
        let b = write_file(&dir, "b.bin", b"bar");

        let hasher = Hasher::new();
        assert_ne!(hasher.hash_file(&a).unwrap(), hasher.hash_file(&b).unwrap());
    }

    #[test]
    fn test_hash_multi_block_file() {
        let dir = TempDir::new().unwrap();
        // Spans three read buffers
        let content = vec![0xA5u8; BLOCK_SIZE * 2 + 17];
        let path = write_file(&dir, "big.bin", &content);

        let hasher = Hasher::new();
        let expected: Hash = *blake3::hash(&content).as_bytes();
        assert_eq!(hasher.hash_file(&path).unwrap(), expected);
    }

    #[test]
    fn test_empty_hash_matches_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty", b"");

        let hasher = Hasher::new();
        assert_eq!(hasher.hash_file(&path).unwrap(), Hasher::empty_hash());
    }

    #[test]
    fn test_hash_missing_file_fails() {
        let hasher = Hasher::new();
        let err = hasher.hash_file(Path::new("/nonexistent/file-12345")).unwrap_err();
        assert!(matches!(err, HashError::NotFound(_)));
    }

    #[test]
    fn test_hex_round_trip() {
        let mut hash = [0u8; 32];
        hash[0] = 0xAB;
        hash[31] = 0x01;

        let hex = hash_to_hex(&hash);
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("ab"));
        assert_eq!(hex_to_hash(&hex), Some(hash));
    }

    #[test]
    fn test_hex_to_hash_rejects_malformed() {
        assert_eq!(hex_to_hash(""), None);
        assert_eq!(hex_to_hash("abcd"), None);
        assert_eq!(hex_to_hash(&"zz".repeat(32)), None);
    }
}
