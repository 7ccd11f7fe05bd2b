//! Release status classification.
//!
//! Maps a raw version onto the scheme `integration < milestone < rc < release`
//! used by `latest.<status>` style dynamic selectors.

use crate::error::MavenError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static MILESTONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^M\d+$").expect("Invalid regex"));

static RC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^RC\d+$").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    Integration,
    Milestone,
    Rc,
    Release,
}

/// All statuses, least mature first.
pub const STATUS_SCHEME: [VersionStatus; 4] = [
    VersionStatus::Integration,
    VersionStatus::Milestone,
    VersionStatus::Rc,
    VersionStatus::Release,
];

impl VersionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integration => "integration",
            Self::Milestone => "milestone",
            Self::Rc => "rc",
            Self::Release => "release",
        }
    }
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionStatus {
    type Err = MavenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STATUS_SCHEME
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| MavenError::UnknownStatus(s.to_string()))
    }
}

/// Classifies a raw version string.
///
/// Rules apply in order and are case-sensitive:
/// 1. ends with `-SNAPSHOT`: integration
/// 2. the whole string is `M<digits>`: milestone
/// 3. the whole string is `RC<digits>`: rc
/// 4. anything else: release
///
/// ```
/// use dynver_maven::{VersionStatus, classify};
///
/// assert_eq!(classify("2.0.0-SNAPSHOT"), VersionStatus::Integration);
/// assert_eq!(classify("RC1"), VersionStatus::Rc);
/// assert_eq!(classify("2.0.0.RELEASE"), VersionStatus::Release);
/// ```
pub fn classify(version: &str) -> VersionStatus {
    if version.ends_with("-SNAPSHOT") {
        VersionStatus::Integration
    } else if MILESTONE_PATTERN.is_match(version) {
        VersionStatus::Milestone
    } else if RC_PATTERN.is_match(version) {
        VersionStatus::Rc
    } else {
        VersionStatus::Release
    }
}

/// Highest version in an ascending listing whose status is at least `minimum`.
pub fn latest_with_status<S: AsRef<str>>(versions: &[S], minimum: VersionStatus) -> Option<&str> {
    versions
        .iter()
        .rev()
        .map(AsRef::<str>::as_ref)
        .find(|version| classify(version) >= minimum)
}
