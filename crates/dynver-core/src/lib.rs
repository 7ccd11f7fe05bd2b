//! Core abstractions for dynver.
//!
//! This crate provides the pieces shared by the ecosystem crate and the
//! command line front end:
//! - **Errors**: `DynverError` and the crate-wide `Result` alias
//! - **Configuration**: `DynverConfig`, loaded from JSON
//! - **HTTP Cache**: conditional-request cache used by remote repositories
//! - **Resource access**: the `ResourceAccessor` trait with HTTP and
//!   filesystem implementations

pub mod cache;
pub mod config;
pub mod error;
pub mod resource;

pub use cache::{CachedResponse, HttpCache};
pub use config::{DynverConfig, HttpConfig, RepositoryConfig};
pub use error::{DynverError, Result};
pub use resource::{FileResourceAccessor, HttpResourceAccessor, ResourceAccessor};
