use clap::{Args, Parser, Subcommand};
use dynver_maven::{ModuleId, VersionStatus};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dynver", version, about = "Order, list and classify Maven versions", long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log more (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            _ => "debug",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the versions of a module, oldest first
    List {
        /// Module coordinates, groupId:artifactId
        module: ModuleId,

        #[command(flatten)]
        source: SourceArgs,

        /// Print JSON with the status of every version
        #[arg(long)]
        json: bool,
    },

    /// Print the newest version with at least the given status
    Latest {
        /// Module coordinates, groupId:artifactId
        module: ModuleId,

        #[arg(long, default_value = "release")]
        status: VersionStatus,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Print the status of each version
    Status {
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Compare two versions
    Compare { left: String, right: String },

    /// Print the normalized form of each version
    Canonical {
        #[arg(required = true)]
        versions: Vec<String>,
    },

    /// Order versions the way listings are ordered
    Sort {
        #[arg(required = true)]
        versions: Vec<String>,
    },
}

/// Where module metadata is read from.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Remote repository base URL
    #[arg(long, value_name = "URL", conflicts_with = "local")]
    pub repo: Option<String>,

    /// Local repository directory, e.g. ~/.m2/repository
    #[arg(long, value_name = "DIR")]
    pub local: Option<PathBuf>,
}
