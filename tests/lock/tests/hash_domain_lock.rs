//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Domain byte strings are unique
//! 2. Domains are null-terminated and follow `RIBBON::*::V1\0`
//! 3. No raw `RIBBON::` domain literals in production source outside
//!    `fingerprint.rs`
//! 4. The diagram fingerprint is SHA-256 over the documented byte layout

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ribbon_kernel::carrier::oriented::oriented_pd;
use ribbon_kernel::invariants::fingerprint::{
    diagram_fingerprint, ALL_DOMAINS, DOMAIN_DIAGRAM,
};
use sha2::{Digest, Sha256};

use lock_tests::walk_helpers::table_link;

// ---------------------------------------------------------------------------
// 1. Unique
// ---------------------------------------------------------------------------

#[test]
fn domains_are_unique() {
    let mut seen = BTreeSet::new();
    for domain in ALL_DOMAINS {
        assert!(
            seen.insert(*domain),
            "duplicate domain bytes: {}",
            String::from_utf8_lossy(domain)
        );
    }
    assert_eq!(seen.len(), 2, "update this count when adding a domain");
}

// ---------------------------------------------------------------------------
// 2. Naming convention
// ---------------------------------------------------------------------------

#[test]
fn domains_follow_naming_convention() {
    for domain in ALL_DOMAINS {
        let text = String::from_utf8_lossy(domain);
        assert!(domain.starts_with(b"RIBBON::"), "{text} lacks RIBBON::");
        assert!(domain.ends_with(b"::V1\0"), "{text} does not end with ::V1\\0");
    }
}

// ---------------------------------------------------------------------------
// 3. No raw literals outside the authority file
// ---------------------------------------------------------------------------

#[test]
fn no_raw_domain_literals_outside_authority() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let mut violations = Vec::new();
    for crate_dir in ["kernel/src", "search/src", "harness/src"] {
        for path in walkdir(&root.join(crate_dir)) {
            if path.extension().and_then(|e| e.to_str()) != Some("rs")
                || path.file_name().and_then(|n| n.to_str()) == Some("fingerprint.rs")
            {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(&path) else {
                continue;
            };
            for (i, line) in content.lines().enumerate() {
                if line.contains("b\"RIBBON::") {
                    violations.push(format!("  {}:{}: {}", path.display(), i + 1, line.trim()));
                }
            }
        }
    }
    assert!(
        violations.is_empty(),
        "raw RIBBON:: domain literals outside fingerprint.rs:\n{}",
        violations.join("\n")
    );
}

/// Simple recursive directory walker.
fn walkdir(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                results.extend(walkdir(&path));
            } else {
                results.push(path);
            }
        }
    }
    results
}

// ---------------------------------------------------------------------------
// 4. Fingerprint byte layout
// ---------------------------------------------------------------------------

#[test]
fn fingerprint_matches_documented_layout() {
    for name in ["3_1", "6_1", "hopf", "unknot"] {
        let link = table_link(name);
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_DIAGRAM);
        for label in oriented_pd(&link.diagram).iter().flatten() {
            hasher.update(label.to_le_bytes());
        }
        hasher.update((link.diagram.free_loops() as u64).to_le_bytes());
        let expected = format!("sha256:{}", hex::encode(hasher.finalize()));
        assert_eq!(diagram_fingerprint(&link.diagram).as_str(), expected, "{name}");
    }
}
