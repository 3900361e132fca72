//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique
//! 3. All domains are null-terminated and follow `ARBOR::*::V1\0`
//! 4. No raw `ARBOR::` domain literals in production source outside `hash_domain.rs`
//! 5. Identical bytes hash differently under each domain
//! 6. `canonical_hash` is plain SHA-256 over `domain || data`

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use arbor_kernel::proof::hash::canonical_hash;
use arbor_kernel::proof::hash_domain::HashDomain;

#[test]
fn hash_domain_canonical_set_count() {
    assert_eq!(
        HashDomain::ALL.len(),
        3,
        "expected 3 domain variants; if you added a new domain, update this count"
    );
}

#[test]
fn hash_domain_all_unique_bytes() {
    let mut seen = BTreeSet::new();
    for domain in HashDomain::ALL {
        assert!(
            seen.insert(domain.as_bytes()),
            "duplicate domain bytes: {domain}"
        );
    }
}

#[test]
fn hash_domain_all_follow_naming_convention() {
    for domain in HashDomain::ALL {
        let bytes = domain.as_bytes();
        assert!(bytes.starts_with(b"ARBOR::"), "{domain} does not start with ARBOR::");
        assert!(bytes.ends_with(b"::V1\0"), "{domain} does not end with ::V1\\0");
    }
}

fn rust_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            rust_files(&path, out);
        } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
            out.push(path);
        }
    }
}

#[test]
fn no_raw_domain_literals_outside_authority() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let mut files = Vec::new();
    for crate_dir in ["kernel/src", "search/src", "harness/src"] {
        rust_files(&root.join(crate_dir), &mut files);
    }
    assert!(!files.is_empty(), "no production sources found");

    let violations: Vec<String> = files
        .iter()
        .filter(|p| p.file_name().and_then(|n| n.to_str()) != Some("hash_domain.rs"))
        .filter(|p| {
            std::fs::read_to_string(p).is_ok_and(|content| content.contains("b\"ARBOR::"))
        })
        .map(|p| p.display().to_string())
        .collect();

    assert!(
        violations.is_empty(),
        "raw ARBOR:: domain literals found outside hash_domain.rs:\n{}",
        violations.join("\n")
    );
}

#[test]
fn same_bytes_hash_differently_per_domain() {
    let digests: BTreeSet<String> = HashDomain::ALL
        .iter()
        .map(|d| canonical_hash(*d, b"{}").as_str().to_string())
        .collect();
    assert_eq!(digests.len(), HashDomain::ALL.len());
}

#[test]
fn canonical_hash_matches_independent_sha256() {
    use sha2::{Digest, Sha256};

    let data = br#"{"a":1}"#;
    for domain in HashDomain::ALL {
        let mut hasher = Sha256::new();
        hasher.update(domain.as_bytes());
        hasher.update(data);
        let expected = format!("sha256:{}", hex::encode(hasher.finalize()));
        assert_eq!(canonical_hash(*domain, data).as_str(), expected);
    }
}
