//! Errors specific to Maven metadata handling.

use dynver_core::DynverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MavenError {
    #[error("Failed to parse maven-metadata.xml: {message}")]
    MetadataParse { message: String },

    #[error("Invalid Maven coordinates '{coordinates}': expected 'groupId:artifactId'")]
    InvalidCoordinates { coordinates: String },

    #[error("Unknown version status '{0}'")]
    UnknownStatus(String),

    #[error(transparent)]
    Resource(#[from] DynverError),
}

pub type Result<T> = std::result::Result<T, MavenError>;

impl MavenError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Resource(e) if e.is_not_found())
    }
}

impl From<MavenError> for DynverError {
    fn from(err: MavenError) -> Self {
        match err {
            MavenError::MetadataParse { message } => Self::ParseError {
                document: "maven-metadata.xml".into(),
                message,
            },
            MavenError::InvalidCoordinates { coordinates } => Self::ParseError {
                document: "coordinates".into(),
                message: format!("'{coordinates}' is not 'groupId:artifactId'"),
            },
            MavenError::UnknownStatus(status) => Self::ParseError {
                document: "status".into(),
                message: format!("unknown status '{status}'"),
            },
            MavenError::Resource(e) => e,
        }
    }
}
