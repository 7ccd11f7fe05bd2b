use dynver_core::DynverError;
use dynver_maven::{MavenError, ModuleId, VersionStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] DynverError),

    #[error(transparent)]
    Maven(#[from] MavenError),

    #[error("No version of {module} has status {status} or better")]
    NoMatchingVersion {
        module: ModuleId,
        status: VersionStatus,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// The message followed by one `caused by:` line per underlying error.
    ///
    /// Causes whose text the message already contains are left out.
    pub fn report(&self) -> String {
        let mut message = format!("error: {self}");
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(&format!("\n  caused by: {cause_text}"));
            }
            source = cause.source();
        }
        message
    }
}
