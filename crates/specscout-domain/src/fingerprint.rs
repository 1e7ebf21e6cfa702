//! Content fingerprints for duplicate detection

use std::fmt;

/// Length of a fingerprint digest in bytes (SHA-256)
pub const FINGERPRINT_LEN: usize = 32;

/// Fixed-length digest of a file's byte content
///
/// Two files with identical bytes always carry identical fingerprints,
/// regardless of name or location. The digest itself is computed by the
/// scanner layer; this type only carries and compares it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Wrap a raw digest
    pub fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Abbreviated hex form for log lines
    pub fn short(&self) -> String {
        self.to_string()[..12].to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
