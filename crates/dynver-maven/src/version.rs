//! Maven version ordering.
//!
//! A version string is tokenized into numbers and qualifiers grouped into
//! nested lists: `.` separates items of the same list, while `-` and any
//! switch between digits and letters open a new list nested as the last item
//! of the current one. `1.2-rc3` therefore reads as `[1, 2, [rc, [3]]]`.
//!
//! Because a nested list is always the final item of its parent, the tree is
//! a chain and is stored as one [`ListItem`] per depth. Parsing, comparison,
//! hashing and rendering all walk that chain iteratively, so pathological
//! inputs with thousands of nesting levels cannot exhaust the stack.
//!
//! Comparison flattens the chain once into sort keys and compares those
//! lexicographically, which keeps the order total. Positions line up the
//! Maven way: a number outranks a nested list, a nested list outranks a
//! qualifier, and a missing item sits between the pre-release qualifiers and
//! everything else. Two rules bend where following Maven literally would make
//! the order cyclic: a nested list ranks by its first item against a missing
//! one even when compared with a qualifier (`1-alpha < 1 < 1.sp`), and a
//! null item in the middle of a version that is followed by something below a
//! missing item ranks just below a missing item too (`1.0.alpha < 1 < 1.sp`).
//!
//! Qualifiers order as
//! `alpha < beta < milestone < rc = cr < snapshot < "" = ga = final = release < sp`,
//! and any other qualifier sorts after `sp`, lexically among themselves.

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

/// Well-known qualifiers. Declaration order is the ordering.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    /// The empty qualifier of a plain release (`ga`, `final`, `release`).
    Release,
    Sp,
    /// Unrecognized qualifier, lower-cased.
    Other(String),
}

static QUALIFIERS: LazyLock<HashMap<&'static str, Qualifier>> = LazyLock::new(|| {
    HashMap::from([
        ("alpha", Qualifier::Alpha),
        ("beta", Qualifier::Beta),
        ("milestone", Qualifier::Milestone),
        ("rc", Qualifier::Rc),
        ("cr", Qualifier::Rc),
        ("snapshot", Qualifier::Snapshot),
        ("", Qualifier::Release),
        ("ga", Qualifier::Release),
        ("final", Qualifier::Release),
        ("release", Qualifier::Release),
        ("sp", Qualifier::Sp),
    ])
});

impl Qualifier {
    /// Maps lower-cased text to a qualifier.
    ///
    /// `a`, `b` and `m` directly followed by a digit are shorthands for
    /// `alpha`, `beta` and `milestone` (`1a1` reads as `1-alpha-1`).
    pub fn parse(text: &str, followed_by_digit: bool) -> Self {
        let text = match (followed_by_digit, text) {
            (true, "a") => "alpha",
            (true, "b") => "beta",
            (true, "m") => "milestone",
            (_, other) => other,
        };
        QUALIFIERS
            .get(text)
            .cloned()
            .unwrap_or_else(|| Self::Other(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Alpha => "alpha",
            Self::Beta => "beta",
            Self::Milestone => "milestone",
            Self::Rc => "rc",
            Self::Snapshot => "snapshot",
            Self::Release => "",
            Self::Sp => "sp",
            Self::Other(text) => text,
        }
    }

    /// Qualifiers that rank below a plain release.
    pub fn is_prerelease(&self) -> bool {
        *self < Self::Release
    }
}

/// A single number or qualifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Item {
    Number(BigUint),
    Qualifier(Qualifier),
}

impl Item {
    fn parse(is_digit: bool, token: &str) -> Self {
        if is_digit {
            Self::Number(BigUint::parse_bytes(token.as_bytes(), 10).unwrap_or_default())
        } else {
            Self::Qualifier(Qualifier::parse(token, false))
        }
    }

    fn zero() -> Self {
        Self::Number(BigUint::default())
    }

    /// Null items compare equal to a missing item: `0` and the release qualifier.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Number(n) => *n == BigUint::default(),
            Self::Qualifier(q) => *q == Qualifier::Release,
        }
    }

    fn render(&self, out: &mut String) {
        match self {
            Self::Number(n) => out.push_str(&n.to_string()),
            // Only survives normalization when followed by another item.
            Self::Qualifier(Qualifier::Release) => out.push_str("ga"),
            Self::Qualifier(q) => out.push_str(q.as_str()),
        }
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Number(_), Self::Qualifier(_)) => Ordering::Greater,
            (Self::Qualifier(_), Self::Number(_)) => Ordering::Less,
            (Self::Qualifier(a), Self::Qualifier(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Qualifier(q) => f.write_str(q.as_str()),
        }
    }
}

/// The scalar items of one nesting level.
///
/// The list one level deeper, when present, is the implicit last item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListItem {
    items: Vec<Item>,
}

impl ListItem {
    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// A parsed Maven version.
///
/// Equality, hashing and ordering use the normalized items only, so
/// `1`, `1.0`, `1-0` and `1GA` are interchangeable keys. [`Display`]
/// shows the original string; [`ComparableVersion::canonical`] the
/// normalized one.
///
/// [`Display`]: fmt::Display
///
/// # Examples
///
/// ```
/// use dynver_maven::ComparableVersion;
///
/// let rc = ComparableVersion::new("6.1.0rc3");
/// let release = ComparableVersion::new("6.1.0");
/// assert!(rc < release);
/// assert_eq!(ComparableVersion::new("1.0.0-GA"), ComparableVersion::new("1"));
/// assert_eq!(ComparableVersion::new("1a1").canonical(), "1-alpha-1");
/// ```
#[derive(Debug, Clone)]
pub struct ComparableVersion {
    value: String,
    lists: Vec<ListItem>,
    keys: Vec<SortKey>,
}

impl ComparableVersion {
    pub fn new(version: impl Into<String>) -> Self {
        let value = version.into();
        let lists = parse_lists(&value);
        let keys = sort_keys(&lists);
        Self { value, lists, keys }
    }

    /// The string this version was created from.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Nesting levels, outermost first.
    ///
    /// `lists()[n + 1]` is the last item of `lists()[n]`. There is always at
    /// least the top-level list, which is empty for versions such as `""` or `0`.
    pub fn lists(&self) -> &[ListItem] {
        &self.lists
    }

    /// Normalized string form.
    ///
    /// Parsing the canonical form yields a version equal to this one.
    pub fn canonical(&self) -> String {
        let mut out = String::with_capacity(self.value.len());
        for (depth, list) in self.lists.iter().enumerate() {
            if depth > 0 {
                out.push('-');
            }
            if list.items.is_empty() {
                // A list whose first item is itself a list; `0` is stripped
                // again when parsed.
                if depth + 1 < self.lists.len() {
                    out.push('0');
                }
                continue;
            }
            for (index, item) in list.items.iter().enumerate() {
                if index > 0 {
                    out.push('.');
                }
                item.render(&mut out);
            }
        }
        out
    }
}

/// Tokenizes `version` into its chain of lists.
///
/// The chain doubles as the parse stack: the current list is always the last
/// one, and opening a list pushes a new level.
fn parse_lists(version: &str) -> Vec<ListItem> {
    let version = version.to_lowercase();
    let mut lists = vec![ListItem::default()];
    let mut is_digit = false;
    let mut start = 0;

    for (i, c) in version.char_indices() {
        match c {
            '.' | '-' => {
                let item = if i == start {
                    Item::zero()
                } else {
                    Item::parse(is_digit, &version[start..i])
                };
                push_item(&mut lists, item);
                start = i + 1;
                if c == '-' {
                    lists.push(ListItem::default());
                }
            }
            c if c.is_ascii_digit() => {
                if !is_digit && i > start {
                    let qualifier = Qualifier::parse(&version[start..i], true);
                    push_item(&mut lists, Item::Qualifier(qualifier));
                    start = i;
                    lists.push(ListItem::default());
                }
                is_digit = true;
            }
            _ => {
                if is_digit && i > start {
                    push_item(&mut lists, Item::parse(true, &version[start..i]));
                    start = i;
                    lists.push(ListItem::default());
                }
                is_digit = false;
            }
        }
    }

    if version.len() > start {
        push_item(&mut lists, Item::parse(is_digit, &version[start..]));
    }

    normalize(&mut lists);
    lists
}

fn push_item(lists: &mut [ListItem], item: Item) {
    if let Some(current) = lists.last_mut() {
        current.items.push(item);
    }
}

/// Strips trailing null items from every list, deepest first, and drops
/// nested lists left empty. Nulls directly before a nested list are trailing
/// items too: `1.0-a` normalizes to `1-a`.
fn normalize(lists: &mut Vec<ListItem>) {
    for depth in (0..lists.len()).rev() {
        let items = &mut lists[depth].items;
        while items.last().is_some_and(Item::is_null) {
            items.pop();
        }
        let is_innermost = depth + 1 == lists.len();
        if depth > 0 && is_innermost && lists[depth].items.is_empty() {
            lists.pop();
        }
    }
}

/// One item of the flattened chain.
///
/// Variant order is the ranking, so comparing key sequences lexicographically
/// orders versions. `opens` counts the lists that start right before the item.
/// A null item (`0` or the release qualifier) that is not trailing takes the
/// side of [`SortKey::End`] that the items after it fall on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum SortKey {
    PreRelease { opens: usize, qualifier: Qualifier },
    LowRelease { opens: usize },
    LowZero { opens: Reverse<usize> },
    /// End of the version.
    End,
    PostRelease { opens: usize, qualifier: Qualifier },
    Number { opens: Reverse<usize>, value: BigUint },
}

fn sort_keys(lists: &[ListItem]) -> Vec<SortKey> {
    let mut flat = Vec::new();
    let mut opens = 0;
    for list in lists {
        for item in &list.items {
            flat.push((opens, item));
            opens = 0;
        }
        opens += 1;
    }

    // Built back to front: a null item needs to know what follows it
    let mut keys = Vec::with_capacity(flat.len() + 1);
    keys.push(SortKey::End);
    let mut above_end = false;
    for (opens, item) in flat.into_iter().rev() {
        let key = match item {
            Item::Number(value) if above_end || !item.is_null() => SortKey::Number {
                opens: Reverse(opens),
                value: value.clone(),
            },
            Item::Number(_) => SortKey::LowZero {
                opens: Reverse(opens),
            },
            Item::Qualifier(q) if q.is_prerelease() => SortKey::PreRelease {
                opens,
                qualifier: q.clone(),
            },
            Item::Qualifier(Qualifier::Release) if !above_end => SortKey::LowRelease { opens },
            Item::Qualifier(q) => SortKey::PostRelease {
                opens,
                qualifier: q.clone(),
            },
        };
        above_end = key > SortKey::End;
        keys.push(key);
    }
    keys.reverse();
    keys
}

impl Ord for ComparableVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.keys.cmp(&other.keys)
    }
}

impl PartialOrd for ComparableVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ComparableVersion {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl Eq for ComparableVersion {}

impl Hash for ComparableVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.keys.hash(state);
    }
}

impl fmt::Display for ComparableVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for ComparableVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ComparableVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ComparableVersion {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for ComparableVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for ComparableVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn v(version: &str) -> ComparableVersion {
        ComparableVersion::new(version)
    }

    fn num(n: u32) -> Item {
        Item::Number(BigUint::from(n))
    }

    fn qualifier(text: &str) -> Item {
        Item::Qualifier(Qualifier::parse(text, false))
    }

    fn hash_of(version: &ComparableVersion) -> u64 {
        let mut hasher = DefaultHasher::new();
        version.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_dot_stays_in_list() {
        let version = v("1.2.3");
        assert_eq!(version.lists().len(), 1);
        assert_eq!(version.lists()[0].items(), &[num(1), num(2), num(3)]);
    }

    #[test]
    fn test_dash_and_transitions_nest() {
        let version = v("1.2-rc3");
        let lists = version.lists();
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[0].items(), &[num(1), num(2)]);
        assert_eq!(lists[1].items(), &[Item::Qualifier(Qualifier::Rc)]);
        assert_eq!(lists[2].items(), &[num(3)]);
    }

    #[test]
    fn test_trailing_nulls_stripped() {
        assert_eq!(v("1.0.0").lists()[0].items(), &[num(1)]);
        assert_eq!(v("1-0").lists().len(), 1);
        assert_eq!(v("1.0-a").lists()[0].items(), &[num(1)]);
        assert_eq!(v("1.0-a").lists()[1].items(), &[qualifier("a")]);
    }

    #[test]
    fn test_empty_segments_are_zero() {
        assert_eq!(v("1..2").lists()[0].items(), &[num(1), num(0), num(2)]);
        assert_eq!(v(".1"), v("0.1"));
    }

    #[test]
    fn test_empty_and_null_versions() {
        for version in ["", "0", ".", "-", "0.0-0", "ga", "final-0"] {
            let parsed = v(version);
            assert_eq!(parsed.lists().len(), 1, "{version}");
            assert!(parsed.lists()[0].items().is_empty(), "{version}");
            assert_eq!(parsed.canonical(), "");
            assert_eq!(parsed, v(""));
        }
    }

    #[test]
    fn test_qualifier_aliases() {
        assert_eq!(Qualifier::parse("a", true), Qualifier::Alpha);
        assert_eq!(Qualifier::parse("a", false), Qualifier::Other("a".into()));
        assert_eq!(Qualifier::parse("cr", false), Qualifier::Rc);
        assert_eq!(Qualifier::parse("final", false), Qualifier::Release);
        assert_eq!(Qualifier::parse("ab", true), Qualifier::Other("ab".into()));
    }

    #[test]
    fn test_qualifier_table_order() {
        let ordered = [
            Qualifier::Alpha,
            Qualifier::Beta,
            Qualifier::Milestone,
            Qualifier::Rc,
            Qualifier::Snapshot,
            Qualifier::Release,
            Qualifier::Sp,
            Qualifier::Other("a".into()),
            Qualifier::Other("ab".into()),
            Qualifier::Other("b".into()),
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1], "{:?} < {:?}", pair[0], pair[1]);
        }
        assert!(Qualifier::Snapshot.is_prerelease());
        assert!(!Qualifier::Release.is_prerelease());
        assert!(!Qualifier::Other("abc".into()).is_prerelease());
    }

    #[test]
    fn test_numbers_outrank_qualifiers_and_lists() {
        assert!(num(0) > qualifier("zzz"));
        assert!(v("1.1") > v("1-1"));
        assert!(v("1-1") > v("1-sp"));
        assert!(v("1.0.1") > v("1-rc"));
    }

    #[test]
    fn test_null_items_in_the_middle() {
        assert!(v("1.0.alpha") < v("1"));
        assert!(v("1") < v("1.sp"));
        assert!(v("1.sp") < v("1.0.sp"));
        assert!(v("1.ga.alpha") < v("1"));
        assert!(v("1") < v("1.ga.1"));
        assert!(v("1.4.0.M1") < v("1.4.0.RC1"));
        assert!(v("1.4.0.RC1") < v("1.4.0.RELEASE"));
        assert!(v("2.0.a") < v("2.0.0.a"));
    }

    #[test]
    fn test_order_is_transitive_with_bare_nested_lists() {
        let versions = ["0-1", "0", "0ga00x", "0.alpha", "0..alpha-1"].map(v);
        for a in &versions {
            for b in &versions {
                for c in &versions {
                    if a < b && b < c {
                        assert!(a < c, "{a} < {b} < {c}");
                    }
                }
            }
        }

        let mut sorted = versions.to_vec();
        sorted.sort();
        let sorted: Vec<_> = sorted.iter().map(ComparableVersion::as_str).collect();
        assert_eq!(sorted, ["0.alpha", "0..alpha-1", "0", "0ga00x", "0-1"]);
    }

    #[test]
    fn test_canonical_forms() {
        insta::assert_snapshot!(v("1a1").canonical(), @"1-alpha-1");
        insta::assert_snapshot!(v("1.0.0-GA").canonical(), @"1");
        insta::assert_snapshot!(v("1.0-SNAPSHOT").canonical(), @"1-snapshot");
        insta::assert_snapshot!(v("6.1H.5-beta").canonical(), @"6.1-h.5-beta");
        insta::assert_snapshot!(v("1.ga.1").canonical(), @"1.ga.1");
        insta::assert_snapshot!(v("1--1").canonical(), @"1-0-1");
        insta::assert_snapshot!(v("-1").canonical(), @"0-1");
        insta::assert_snapshot!(v("1-alpha2snapshot").canonical(), @"1-alpha-2-snapshot");
    }

    #[test]
    fn test_canonical_round_trip_edge_cases() {
        for version in [
            "1--1", "-1", "1.ga.1", "--", "a-", "1-.1", "1_2", "1.0a-0b.c", "..1..", "x-0-y",
        ] {
            let parsed = v(version);
            let reparsed = v(&parsed.canonical());
            assert_eq!(parsed, reparsed, "{version} -> {}", parsed.canonical());
            assert_eq!(parsed.canonical(), reparsed.canonical());
        }
    }

    #[test]
    fn test_display_keeps_original() {
        let version = v("1.0.0.RELEASE");
        assert_eq!(version.to_string(), "1.0.0.RELEASE");
        assert_eq!(version.as_str(), "1.0.0.RELEASE");
        assert_eq!(version.canonical(), "1");
    }

    #[test]
    fn test_eq_and_hash_ignore_spelling() {
        assert_eq!(v("1GA"), v("1"));
        assert_eq!(hash_of(&v("1GA")), hash_of(&v("1")));
        assert_eq!(hash_of(&v("1.0-alpha-1")), hash_of(&v("1a1")));
        assert_ne!(v("1-a-1"), v("1a1"));
    }

    #[test]
    fn test_enormous_digit_runs() {
        let zeros = "0".repeat(500);
        assert_eq!(v(&zeros), v("0"));
        assert_eq!(v(&format!("{zeros}1")), v("1"));

        let big = format!("1{}", "0".repeat(300));
        let bigger = format!("2{}", "0".repeat(300));
        assert!(v(&big) < v(&bigger));
        assert!(v(&big) > v("18446744073709551616"));
        assert_eq!(v(&big).canonical(), big);
    }

    #[test]
    fn test_deep_nesting_is_iterative() {
        let prefix = "1a".repeat(49_999);
        let a = v(&format!("{prefix}1a"));
        let b = v(&format!("{prefix}1b"));
        assert_eq!(a.lists().len(), 100_000);
        assert!(a < b);
        assert_eq!(a, v(&a.canonical()));
        assert_ne!(hash_of(&a), hash_of(&b));
        drop(a);
    }

    #[test]
    fn test_from_str_and_serde() {
        let parsed: ComparableVersion = "2.0.0.M3".parse().unwrap();
        assert_eq!(parsed.as_str(), "2.0.0.M3");

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, "\"2.0.0.M3\"");
        let back: ComparableVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "2.0.0.M3");
        assert_eq!(back, parsed);
    }

    #[test]
    fn test_non_ascii_digits_are_qualifiers() {
        let version = v("1.\u{0663}");
        assert_eq!(
            version.lists()[0].items()[1],
            Item::Qualifier(Qualifier::Other("\u{0663}".into()))
        );
    }
}
