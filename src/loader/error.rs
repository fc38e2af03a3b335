use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a whole loader call for one scope.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot determine home directory")]
    HomeDirUnavailable,

    #[error("cannot determine working directory")]
    WorkingDirUnavailable,

    #[error("malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DiscoveryError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
