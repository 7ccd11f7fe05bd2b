//! Configuration for repository access.
//!
//! All fields have defaults, so an empty JSON object is a valid config.
//!
//! ```json
//! {
//!   "repository": {
//!     "url": "https://repo.spring.io/milestone",
//!     "metadataDocument": "maven-metadata.xml"
//!   },
//!   "http": { "timeoutSecs": 10 }
//! }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_REPOSITORY_URL: &str = "https://repo.maven.apache.org/maven2";
pub const DEFAULT_METADATA_DOCUMENT: &str = "maven-metadata.xml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DynverConfig {
    pub repository: RepositoryConfig,
    pub http: HttpConfig,
}

impl DynverConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryConfig {
    /// Base URL of the Maven repository.
    pub url: String,
    /// Name of the per-artifact index document.
    pub metadata_document: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REPOSITORY_URL.to_string(),
            metadata_document: DEFAULT_METADATA_DOCUMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("dynver/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
