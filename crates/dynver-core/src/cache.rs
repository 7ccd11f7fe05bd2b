//! HTTP response cache with ETag/Last-Modified revalidation.
//!
//! Every successful response is kept in memory together with its validators.
//! Later requests for the same URL are sent as conditional requests, and a
//! `304 Not Modified` answer is served from the cached body.

use crate::config::HttpConfig;
use crate::error::{DynverError, Result};
use bytes::Bytes;
use dashmap::DashMap;
use reqwest::header::{self, HeaderMap, HeaderName};
use reqwest::{Client, StatusCode};

#[derive(Debug, Clone)]
pub struct CachedResponse {
    pub body: Bytes,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

pub struct HttpCache {
    client: Client,
    entries: DashMap<String, CachedResponse>,
}

impl HttpCache {
    pub fn new() -> Self {
        Self::with_config(&HttpConfig::default())
    }

    pub fn with_config(config: &HttpConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            entries: DashMap::new(),
        }
    }

    /// Fetches `url`, revalidating any cached copy.
    ///
    /// # Errors
    ///
    /// - `ResourceNotFound` for a 404 response
    /// - `HttpStatus` for any other non-success status
    /// - `Http` if the request itself fails (DNS, TLS, timeout, ...)
    pub async fn get_cached(&self, url: &str) -> Result<Bytes> {
        let cached = self.entries.get(url).map(|entry| entry.value().clone());

        let mut request = self.client.get(url);
        if let Some(ref entry) = cached {
            if let Some(ref etag) = entry.etag {
                request = request.header(header::IF_NONE_MATCH, etag);
            }
            if let Some(ref last_modified) = entry.last_modified {
                request = request.header(header::IF_MODIFIED_SINCE, last_modified);
            }
        }

        let response = request.send().await.map_err(|source| DynverError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if status == StatusCode::NOT_MODIFIED {
            return match cached {
                Some(entry) => {
                    tracing::debug!("Cache revalidated: {}", url);
                    Ok(entry.body)
                }
                None => Err(DynverError::CacheError(format!(
                    "received 304 for uncached {url}"
                ))),
            };
        }
        if status == StatusCode::NOT_FOUND {
            return Err(DynverError::ResourceNotFound {
                path: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DynverError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let etag = header_value(response.headers(), &header::ETAG);
        let last_modified = header_value(response.headers(), &header::LAST_MODIFIED);
        let body = response.bytes().await.map_err(|source| DynverError::Http {
            url: url.to_string(),
            source,
        })?;

        tracing::debug!("Fetched {} ({} bytes)", url, body.len());
        self.entries.insert(
            url.to_string(),
            CachedResponse {
                body: body.clone(),
                etag,
                last_modified,
            },
        );

        Ok(body)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for HttpCache {
    fn default() -> Self {
        Self::new()
    }
}

fn header_value(headers: &HeaderMap, name: &HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
