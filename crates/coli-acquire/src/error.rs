use coli_parse::ExtractError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// A comparison failed; wraps the network or extraction error with the
    /// metro it was for.
    #[error("metro {metro_id} ({metro}) failed")]
    Metro {
        metro_id: u32,
        metro: String,
        #[source]
        source: Box<AcquireError>,
    },

    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl AcquireError {
    /// The metro a failure belongs to, if it happened during a comparison.
    pub fn metro_id(&self) -> Option<u32> {
        match self {
            AcquireError::Metro { metro_id, .. } => Some(*metro_id),
            _ => None,
        }
    }

    /// The extraction error at the root of this failure, if any.
    pub fn extract_error(&self) -> Option<&ExtractError> {
        match self {
            AcquireError::Extract(e) => Some(e),
            AcquireError::Metro { source, .. } => source.extract_error(),
            _ => None,
        }
    }
}
