//! Errors raised while processing files.

use std::path::{Path, PathBuf};

/// Failure while stripping tracks.
///
/// Only [`StripError::InvalidInput`] aborts a run. The other variants belong
/// to a single file, which is logged and skipped.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    /// A path given on the command line cannot be processed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// mkvmerge could not report the tracks of a file.
    #[error("failed to identify {}: {source}", path.display())]
    Identify {
        path: PathBuf,
        #[source]
        source: mkvstrip_av::Error,
    },

    /// The remux failed. The original file is untouched.
    #[error("failed to remux {}: {source}", path.display())]
    Remux {
        path: PathBuf,
        #[source]
        source: mkvstrip_av::Error,
    },

    /// The remuxed file could not replace the original.
    #[error("failed to replace {}: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: mkvstrip_av::Error,
    },
}

impl StripError {
    pub fn identify(path: &Path, source: mkvstrip_av::Error) -> Self {
        Self::Identify {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn remux(path: &Path, source: mkvstrip_av::Error) -> Self {
        Self::Remux {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn replace(path: &Path, source: mkvstrip_av::Error) -> Self {
        Self::Replace {
            path: path.to_path_buf(),
            source,
        }
    }
}
