//! Command implementations.
//!
//! Each command returns the lines to print instead of writing to stdout.

use crate::cli::{Cli, Commands, SourceArgs};
use crate::error::{CliError, Result};
use dynver_core::{
    DynverConfig, FileResourceAccessor, HttpCache, HttpResourceAccessor, ResourceAccessor,
};
use dynver_maven::{
    ComparableVersion, MavenVersionLister, ModuleId, VersionStatus, classify, latest_with_status,
    sort_versions,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct ListedVersion<'a> {
    version: &'a str,
    status: VersionStatus,
}

/// Runs the parsed command line.
pub async fn run(cli: &Cli) -> Result<Vec<String>> {
    match &cli.command {
        Commands::List {
            module,
            source,
            json,
        } => {
            let versions = list(&load_config(cli)?, source, module).await?;
            if *json {
                render_json(&versions)
            } else {
                Ok(versions)
            }
        }
        Commands::Latest {
            module,
            status,
            source,
        } => {
            let versions = list(&load_config(cli)?, source, module).await?;
            latest_with_status(&versions, *status)
                .map(|version| vec![version.to_string()])
                .ok_or_else(|| CliError::NoMatchingVersion {
                    module: module.clone(),
                    status: *status,
                })
        }
        Commands::Status { versions } => Ok(status_lines(versions)),
        Commands::Compare { left, right } => Ok(vec![compare(left, right)]),
        Commands::Canonical { versions } => Ok(versions
            .iter()
            .map(|v| ComparableVersion::new(v.as_str()).canonical())
            .collect()),
        Commands::Sort { versions } => Ok(sort_versions(versions.iter().cloned())),
    }
}

fn load_config(cli: &Cli) -> Result<DynverConfig> {
    match &cli.config {
        Some(path) => Ok(DynverConfig::load(path)?),
        None => Ok(DynverConfig::default()),
    }
}

/// Picks the repository from flags, falling back to the configured URL.
fn accessor(config: &DynverConfig, source: &SourceArgs) -> Arc<dyn ResourceAccessor> {
    if let Some(ref dir) = source.local {
        return Arc::new(FileResourceAccessor::new(dir.clone()));
    }
    let url = source
        .repo
        .clone()
        .unwrap_or_else(|| config.repository.url.clone());
    let cache = Arc::new(HttpCache::with_config(&config.http));
    Arc::new(HttpResourceAccessor::new(url, cache))
}

async fn list(config: &DynverConfig, source: &SourceArgs, module: &ModuleId) -> Result<Vec<String>> {
    let lister = MavenVersionLister::new(accessor(config, source))
        .with_metadata_document(config.repository.metadata_document.clone());
    Ok(lister.list(module).await?)
}

fn render_json(versions: &[String]) -> Result<Vec<String>> {
    let listed: Vec<_> = versions
        .iter()
        .map(|version| ListedVersion {
            version,
            status: classify(version),
        })
        .collect();
    let json = serde_json::to_string_pretty(&listed).map_err(dynver_core::DynverError::from)?;
    Ok(vec![json])
}

fn status_lines(versions: &[String]) -> Vec<String> {
    versions
        .iter()
        .map(|version| format!("{} {}", version, classify(version)))
        .collect()
}

fn compare(left: &str, right: &str) -> String {
    let symbol = match ComparableVersion::new(left).cmp(&ComparableVersion::new(right)) {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    format!("{left} {symbol} {right}")
}
