//! Content hashes for diagrams.
//!
//! A fingerprint is SHA-256 over a domain prefix followed by the oriented
//! PD code (little-endian `u32` labels) and the free-loop count. Edge
//! labels are renumbered on export, so relabelling does not change the
//! fingerprint; reordering crossings does. The fingerprint identifies a
//! concrete artifact, not an isotopy class.

use sha2::{Digest, Sha256};

use crate::carrier::diagram::LinkDiagram;
use crate::carrier::oriented::oriented_pd;

/// Domain prefix for diagram fingerprints. Null-terminated.
pub const DOMAIN_DIAGRAM: &[u8] = b"RIBBON::DIAGRAM::V1\0";

/// Domain prefix for walk report hashing. Null-terminated.
pub const DOMAIN_WALK_REPORT: &[u8] = b"RIBBON::WALK_REPORT::V1\0";

/// Every hash domain in use. Domains must be unique.
pub const ALL_DOMAINS: &[&[u8]] = &[DOMAIN_DIAGRAM, DOMAIN_WALK_REPORT];

/// A content-addressed hash with algorithm identifier.
///
/// Format: `"algorithm:hex_digest"` (e.g., `"sha256:abcdef..."`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash {
    full: String,
    colon: usize,
}

impl ContentHash {
    /// Parse from `"algorithm:hex"` format.
    ///
    /// Returns `None` if the colon is missing or either side is empty.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let colon = s.find(':')?;
        if colon == 0 || colon == s.len() - 1 {
            return None;
        }
        Some(Self {
            full: s.to_string(),
            colon,
        })
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.full[..self.colon]
    }

    #[must_use]
    pub fn hex_digest(&self) -> &str {
        &self.full[self.colon + 1..]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.full
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full)
    }
}

/// SHA-256 of `domain || data`, formatted as `"sha256:<hex>"`.
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    let digest = hex::encode(hasher.finalize());
    let full = format!("sha256:{digest}");
    ContentHash { full, colon: 6 }
}

/// Fingerprint of a diagram's oriented PD code and free loops.
#[must_use]
pub fn diagram_fingerprint(diagram: &LinkDiagram) -> ContentHash {
    let pd = oriented_pd(diagram);
    let mut bytes = Vec::with_capacity(pd.len() * 16 + 8);
    for label in pd.iter().flatten() {
        bytes.extend_from_slice(&label.to_le_bytes());
    }
    bytes.extend_from_slice(&(diagram.free_loops() as u64).to_le_bytes());
    canonical_hash(DOMAIN_DIAGRAM, &bytes)
}
