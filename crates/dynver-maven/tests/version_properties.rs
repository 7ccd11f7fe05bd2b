//! Ordering properties of Maven versions over generated strings.

use dynver_maven::{ComparableVersion, sort_versions};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const TOKENS: &[&str] = &[
    "0", "00", "1", "2", "9", "10", ".", "-", "a", "b", "m", "x", "ga", "rc", "sp", "alpha",
    "SNAPSHOT", "İ", "ı",
];

/// Spellings that normalize away when appended to any version.
const NULL_SUFFIXES: &[&str] = &["", ".0", "-0", ".ga", "-final", ".0.0-0"];

fn version() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TOKENS), 0..12).prop_map(|tokens| tokens.concat())
}

fn numeric_version() -> impl Strategy<Value = String> {
    (prop::sample::select(&["0", "1", "7"][..]), version())
        .prop_map(|(first, rest)| format!("{first}{rest}"))
}

fn hash_of(version: &ComparableVersion) -> u64 {
    let mut hasher = DefaultHasher::new();
    version.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn canonical_form_parses_to_equal_version(s in version()) {
        let parsed = ComparableVersion::new(s.as_str());
        let canonical = parsed.canonical();
        let reparsed = ComparableVersion::new(canonical.as_str());
        prop_assert_eq!(&parsed, &reparsed);
        prop_assert_eq!(canonical, reparsed.canonical());
    }

    #[test]
    fn comparison_is_antisymmetric(a in version(), b in version()) {
        let (a, b) = (ComparableVersion::new(a), ComparableVersion::new(b));
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn equality_agrees_with_comparison_and_hash(a in version(), b in version()) {
        let (a, b) = (ComparableVersion::new(a), ComparableVersion::new(b));
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn null_suffix_keeps_version_equal(
        s in version(),
        suffix in prop::sample::select(NULL_SUFFIXES),
    ) {
        let plain = ComparableVersion::new(s.as_str());
        let padded = ComparableVersion::new(format!("{s}{suffix}"));
        prop_assert_eq!(plain.cmp(&padded), Ordering::Equal);
        prop_assert_eq!(&plain, &padded);
        prop_assert_eq!(hash_of(&plain), hash_of(&padded));
    }

    #[test]
    fn comparison_is_transitive(a in version(), b in version(), c in version()) {
        let versions = [a, b, c].map(ComparableVersion::new);
        for x in &versions {
            for y in &versions {
                for z in &versions {
                    if x <= y && y <= z {
                        prop_assert!(x <= z, "{} <= {} <= {} but {} > {}", x, y, z, x, z);
                    }
                }
            }
        }
    }

    #[test]
    fn sorting_yields_ascending_order(versions in prop::collection::vec(version(), 0..64)) {
        let mut parsed: Vec<_> = versions.into_iter().map(ComparableVersion::new).collect();
        parsed.sort();
        for pair in parsed.windows(2) {
            prop_assert!(pair[0] <= pair[1], "{} sorted before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn sort_versions_lists_numeric_versions_ascending(
        numeric in prop::collection::vec(numeric_version(), 0..64),
        codenames in prop::collection::vec("[A-Z][a-z]{1,6}-SR[0-9]", 0..4),
    ) {
        let input: Vec<String> = numeric.iter().chain(&codenames).cloned().collect();
        let sorted = sort_versions(input.clone());

        let unique: HashSet<&String> = input.iter().collect();
        prop_assert_eq!(sorted.len(), unique.len());

        let split = sorted
            .iter()
            .position(|v| !v.starts_with(|c: char| c.is_ascii_digit()))
            .unwrap_or(sorted.len());
        prop_assert!(sorted[split..].iter().all(|v| codenames.contains(v)));
        for pair in sorted[..split].windows(2) {
            let (low, high) = (
                ComparableVersion::new(pair[0].as_str()),
                ComparableVersion::new(pair[1].as_str()),
            );
            prop_assert!(low <= high, "{} listed before {}", low, high);
        }
    }
}
