//! Version listing for a Maven module.
//!
//! Versions come from the module's `maven-metadata.xml`. Versions starting
//! with an ASCII digit are sorted with [`ComparableVersion`]; codenames such
//! as `Moore-SR3` follow them in the order the document lists them.

use crate::error::{MavenError, Result};
use crate::metadata::extract_versions;
use crate::version::ComparableVersion;
use dynver_core::ResourceAccessor;
use dynver_core::config::DEFAULT_METADATA_DOCUMENT;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Maven module coordinates, `groupId:artifactId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleId {
    pub group: String,
    pub name: String,
}

impl ModuleId {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }

    /// Repository path of `document` for this module.
    ///
    /// ```
    /// use dynver_maven::ModuleId;
    ///
    /// let module = ModuleId::new("org.springframework", "spring-core");
    /// assert_eq!(
    ///     module.metadata_path("maven-metadata.xml"),
    ///     "org/springframework/spring-core/maven-metadata.xml"
    /// );
    /// ```
    pub fn metadata_path(&self, document: &str) -> String {
        format!("{}/{}/{}", self.group.replace('.', "/"), self.name, document)
    }
}

impl FromStr for ModuleId {
    type Err = MavenError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || MavenError::InvalidCoordinates {
            coordinates: s.to_string(),
        };
        let (group, name) = s.trim().split_once(':').ok_or_else(invalid)?;
        if group.is_empty() || name.is_empty() || name.contains(':') {
            return Err(invalid());
        }
        Ok(Self::new(group, name))
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)
    }
}

/// Orders raw version strings for listing.
///
/// Exact duplicates are dropped, keeping the first occurrence. Versions that
/// start with an ASCII digit come first in ascending Maven order; the rest
/// keep their relative input order.
///
/// ```
/// use dynver_maven::sort_versions;
///
/// let sorted = sort_versions(["1.3.0", "Codename-X", "1.2.0", "Another-Name"]);
/// assert_eq!(sorted, ["1.2.0", "1.3.0", "Codename-X", "Another-Name"]);
/// ```
pub fn sort_versions<I, S>(versions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();

    // Parse once up front (Schwartzian transform); codenames carry no key
    let mut keyed: Vec<(String, Option<ComparableVersion>)> = versions
        .into_iter()
        .map(Into::into)
        .filter(|version| seen.insert(version.clone()))
        .map(|version| {
            let key = version
                .starts_with(|c: char| c.is_ascii_digit())
                .then(|| ComparableVersion::new(version.as_str()));
            (version, key)
        })
        .collect();

    // sort_by is stable, so equal numerics and all codenames keep input order
    keyed.sort_by(|a, b| match (&a.1, &b.1) {
        (Some(v1), Some(v2)) => v1.cmp(v2),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    keyed.into_iter().map(|(version, _)| version).collect()
}

/// Lists the versions of Maven modules from a repository.
///
/// # Examples
///
/// ```no_run
/// use dynver_core::{HttpCache, HttpResourceAccessor};
/// use dynver_maven::{MavenVersionLister, ModuleId};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let accessor = HttpResourceAccessor::new(
///     "https://repo.maven.apache.org/maven2",
///     Arc::new(HttpCache::new()),
/// );
/// let lister = MavenVersionLister::new(accessor);
/// let module: ModuleId = "org.springframework:spring-core".parse().unwrap();
/// let versions = lister.list(&module).await.unwrap();
/// println!("{} versions, newest {:?}", versions.len(), versions.last());
/// # }
/// ```
pub struct MavenVersionLister<A> {
    accessor: A,
    metadata_document: String,
}

impl<A: ResourceAccessor> MavenVersionLister<A> {
    pub fn new(accessor: A) -> Self {
        Self {
            accessor,
            metadata_document: DEFAULT_METADATA_DOCUMENT.to_string(),
        }
    }

    /// Reads `document` instead of `maven-metadata.xml`.
    #[must_use]
    pub fn with_metadata_document(mut self, document: impl Into<String>) -> Self {
        self.metadata_document = document.into();
        self
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Fetches and sorts the versions of `module`.
    ///
    /// # Errors
    ///
    /// Fails if the metadata document cannot be fetched or parsed. No
    /// versions are returned in that case.
    pub async fn list(&self, module: &ModuleId) -> Result<Vec<String>> {
        let path = module.metadata_path(&self.metadata_document);
        tracing::debug!("Listing {} from {}/{}", module, self.accessor.location(), path);

        let document = self.accessor.fetch(&path).await?;
        let versions = extract_versions(&document)?;
        tracing::debug!("Found {} versions of {}", versions.len(), module);

        Ok(sort_versions(versions))
    }

    /// Like [`list`](Self::list), but logs failures and returns no versions.
    pub async fn list_or_empty(&self, module: &ModuleId) -> Vec<String> {
        match self.list(module).await {
            Ok(versions) => versions,
            Err(e) => {
                tracing::warn!("Failed to list versions of {}: {}", module, e);
                Vec::new()
            }
        }
    }
}
