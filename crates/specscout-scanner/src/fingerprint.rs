//! Content fingerprinting and duplicate detection

use sha2::{Digest, Sha256};
use specscout_domain::{FileProcessingError, Fingerprint};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Mutex;

/// Read buffer size when hashing files (64 KiB)
pub const CHUNK_SIZE: usize = 64 * 1024;

/// SHA-256 fingerprint of an in-memory byte slice
pub fn fingerprint(bytes: &[u8]) -> Fingerprint {
    Fingerprint::from_bytes(Sha256::digest(bytes).into())
}

/// SHA-256 fingerprint of a file, streamed in [`CHUNK_SIZE`] chunks
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, FileProcessingError> {
    let mut file = File::open(path).map_err(|e| FileProcessingError::new(path, e.to_string()))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|e| FileProcessingError::new(path, e.to_string()))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(Fingerprint::from_bytes(hasher.finalize().into()))
}

/// Run-scoped set of fingerprints already seen
///
/// One instance lives for exactly one scan, so repeated scans of the same
/// directory start from an empty set.
#[derive(Debug, Default)]
pub struct ContentFingerprinter {
    seen: Mutex<HashSet<Fingerprint>>,
}

impl ContentFingerprinter {
    /// Create an empty fingerprinter
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `fp`; returns `true` the first time a fingerprint is seen
    pub fn first_sighting(&self, fp: Fingerprint) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(fp)
    }

    /// Fingerprint `path` and record it
    ///
    /// Returns the fingerprint and whether this is its first sighting.
    pub fn check_file(&self, path: &Path) -> Result<(Fingerprint, bool), FileProcessingError> {
        let fp = fingerprint_file(path)?;
        Ok((fp, self.first_sighting(fp)))
    }

    /// Number of distinct fingerprints seen
    pub fn len(&self) -> usize {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Whether nothing has been seen yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
