//! Repository access.
//!
//! [`ResourceAccessor`] fetches a document by repository-relative path.
//! [`HttpResourceAccessor`] reads a remote repository through the shared
//! [`HttpCache`], [`FileResourceAccessor`] a local directory such as
//! `~/.m2/repository`.

use crate::cache::HttpCache;
use crate::error::{DynverError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Read access to the documents of a repository.
///
/// Paths are repository-relative and `/`-separated, e.g.
/// `org/springframework/spring-core/maven-metadata.xml`.
///
/// # Examples
///
/// ```no_run
/// use dynver_core::{HttpCache, HttpResourceAccessor, ResourceAccessor};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let cache = Arc::new(HttpCache::new());
/// let accessor = HttpResourceAccessor::new("https://repo.maven.apache.org/maven2", cache);
/// let bytes = accessor
///     .fetch("org/springframework/spring-core/maven-metadata.xml")
///     .await
///     .unwrap();
/// assert!(!bytes.is_empty());
/// # }
/// ```
#[async_trait]
pub trait ResourceAccessor: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Bytes>;

    /// Human readable location, used in log messages.
    fn location(&self) -> String;
}

#[async_trait]
impl<T: ResourceAccessor + ?Sized> ResourceAccessor for Arc<T> {
    async fn fetch(&self, path: &str) -> Result<Bytes> {
        (**self).fetch(path).await
    }

    fn location(&self) -> String {
        (**self).location()
    }
}

/// Repository served over HTTP(S).
#[derive(Clone)]
pub struct HttpResourceAccessor {
    base_url: String,
    cache: Arc<HttpCache>,
}

impl HttpResourceAccessor {
    pub fn new(base_url: impl Into<String>, cache: Arc<HttpCache>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, cache }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ResourceAccessor for HttpResourceAccessor {
    async fn fetch(&self, path: &str) -> Result<Bytes> {
        let url = self.url_for(path);
        self.cache.get_cached(&url).await.map_err(|e| match e {
            DynverError::ResourceNotFound { .. } => DynverError::ResourceNotFound {
                path: path.to_string(),
            },
            other => other,
        })
    }

    fn location(&self) -> String {
        self.base_url.clone()
    }
}

/// Repository laid out on the local filesystem, such as `~/.m2/repository`.
#[derive(Debug, Clone)]
pub struct FileResourceAccessor {
    root: PathBuf,
}

impl FileResourceAccessor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `path` below the root, refusing paths that would escape it.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(DynverError::ResourceNotFound {
                path: path.to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ResourceAccessor for FileResourceAccessor {
    async fn fetch(&self, path: &str) -> Result<Bytes> {
        let full_path = self.resolve(path)?;
        tracing::debug!("Reading {}", full_path.display());
        match tokio::fs::read(&full_path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DynverError::ResourceNotFound {
                    path: path.to_string(),
                })
            }
            Err(e) => Err(DynverError::Io(e)),
        }
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}
