//! Hash domain governance lock tests.
//!
//! Proves:
//! 1. Canonical domain set has expected count (catches forgotten additions to ALL)
//! 2. All domain byte strings are unique
//! 3. All domains follow the `WAYPOINT::*::V1\0` convention
//! 4. No raw `WAYPOINT::` domain literals in production source outside `hash_domain.rs`
//! 5. Separators actually separate: equal payloads hash differently per domain

use std::collections::BTreeSet;
use std::path::Path;

use waypoint_kernel::proof::hash::{canonical_hash, HashDomain};

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
        assert!(
            bytes.starts_with(b"WAYPOINT::"),
            "{domain} does not start with WAYPOINT::"
        );
        assert!(
            bytes.ends_with(b"::V1\0"),
            "{domain} does not end with ::V1\\0"
        );
    }
}

#[test]
fn no_raw_domain_literals_outside_authority() {
    let production_dirs = [
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../kernel/src"),
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../search/src"),
    ];

    let pattern = "b\"WAYPOINT::";
    let authority_file = "hash_domain.rs";
    let mut violations = Vec::new();

    for dir in &production_dirs {
        scan_dir(Path::new(dir), pattern, authority_file, &mut violations);
    }

    assert!(
        violations.is_empty(),
        "raw WAYPOINT:: domain literals found outside {authority_file}:\n{}",
        violations.join("\n")
    );
}

fn scan_dir(dir: &Path, pattern: &str, authority_file: &str, violations: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(&path, pattern, authority_file, violations);
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some("rs")
            || path.file_name().and_then(|n| n.to_str()) == Some(authority_file)
        {
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            continue;
        };
        for (line_no, line) in content.lines().enumerate() {
            if line.contains(pattern) {
                violations.push(format!("  {}:{}: {}", path.display(), line_no + 1, line.trim()));
            }
        }
    }
}

#[test]
fn same_payload_differs_across_domains() {
    let payload = br#"{"vertex_count":0}"#;
    let digests: BTreeSet<String> = HashDomain::ALL
        .iter()
        .map(|&d| canonical_hash(d, payload).as_str().to_string())
        .collect();
    assert_eq!(digests.len(), HashDomain::ALL.len());
}
