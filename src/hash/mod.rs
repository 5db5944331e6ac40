//! Bounded-cost content hashing
//!
//! The "quickhash" accumulator: a SHA-256 digest over a small, fixed
//! subset of a slide's content (well-known properties plus the raw bytes
//! of the lowest-resolution level), used for identity and version
//! comparison without hashing the whole file.
//!
//! The accumulator can be irreversibly disabled; every later feed becomes
//! a no-op and the digest reports as unavailable. This is how the cost
//! ceiling on pathological inputs degrades gracefully instead of failing.

use log::debug;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Running content hash with an irreversible "no hash" state
pub struct QuickHash {
    /// `None` once the hash has been disabled
    hasher: Option<Sha256>,
}

impl QuickHash {
    /// Creates a new, enabled accumulator
    pub fn new() -> Self {
        QuickHash {
            hasher: Some(Sha256::new()),
        }
    }

    /// Whether the hash is still being computed
    pub fn is_enabled(&self) -> bool {
        self.hasher.is_some()
    }

    /// Irreversibly marks the hash as unavailable
    pub fn disable(&mut self) {
        if self.hasher.take().is_some() {
            debug!("Quickhash disabled");
        }
    }

    /// Feeds raw bytes into the digest
    pub fn feed_bytes(&mut self, data: &[u8]) {
        if let Some(hasher) = &mut self.hasher {
            hasher.update(data);
        }
    }

    /// Feeds a string into the digest, NUL-terminated
    ///
    /// An absent string contributes only the terminator, so present and
    /// absent values remain distinguishable in the digest.
    pub fn feed_string(&mut self, value: Option<&str>) {
        if let Some(hasher) = &mut self.hasher {
            if let Some(s) = value {
                hasher.update(s.as_bytes());
            }
            hasher.update([0u8]);
        }
    }

    /// Feeds an exact byte range of a file into the digest
    ///
    /// # Arguments
    /// * `path` - File to read from
    /// * `offset` - Absolute start of the range
    /// * `length` - Number of bytes to hash
    ///
    /// # Returns
    /// An I/O error if the range cannot be read in full
    pub fn hash_file_range(&mut self, path: &Path, offset: u64, length: u64) -> io::Result<()> {
        if self.hasher.is_none() {
            return Ok(());
        }

        let mut file = File::open(path)?;
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; 64 * 1024];
        let mut remaining = length;
        while remaining > 0 {
            let chunk = remaining.min(buffer.len() as u64) as usize;
            file.read_exact(&mut buffer[..chunk])?;
            self.feed_bytes(&buffer[..chunk]);
            remaining -= chunk as u64;
        }
        Ok(())
    }

    /// Hex-encoded digest of everything fed so far
    ///
    /// Returns `None` once the hash has been disabled.
    pub fn hexdigest(&self) -> Option<String> {
        self.hasher
            .as_ref()
            .map(|hasher| hex::encode(hasher.clone().finalize()))
    }
}

impl Default for QuickHash {
    fn default() -> Self {
        Self::new()
    }
}
