//! Maven version semantics for dynver.
//!
//! - [`ComparableVersion`]: total ordering of Maven version strings
//! - [`MavenVersionLister`]: reads `maven-metadata.xml` through a
//!   [`dynver_core::ResourceAccessor`] and returns the versions sorted
//! - [`classify`]: maps a version string onto the
//!   integration/milestone/rc/release status scheme

pub mod error;
pub mod lister;
pub mod metadata;
pub mod status;
pub mod version;

pub use error::{MavenError, Result};
pub use lister::{MavenVersionLister, ModuleId, sort_versions};
pub use metadata::extract_versions;
pub use status::{STATUS_SCHEME, VersionStatus, classify, latest_with_status};
pub use version::{ComparableVersion, Item, ListItem, Qualifier};
