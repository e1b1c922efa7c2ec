//! Error type shared by identification, remuxing and file replacement.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// mkvmerge is neither at the given path nor on `PATH`.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// mkvmerge could not be started or exited with an error status.
    #[error("{tool} failed: {message}")]
    ToolFailed { tool: String, message: String },

    /// The identification report was malformed.
    #[error("unexpected {tool} output: {message}")]
    ParseError { tool: String, message: String },

    #[error("no such file: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The temporary output is missing or unusable.
    #[error("temporary output: {0}")]
    Workspace(String),

    /// The remuxed output could not take the place of the original.
    #[error("could not replace {}: {message}", path.display())]
    Replace { path: PathBuf, message: String },
}

impl Error {
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn replace(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Replace {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = Error::replace("/movies/a.mkv", "could not delete original: busy");
        assert_eq!(
            err.to_string(),
            "could not replace /movies/a.mkv: could not delete original: busy"
        );
        assert_eq!(
            Error::tool_failed("mkvmerge", "exited with status 2").to_string(),
            "mkvmerge failed: exited with status 2"
        );
    }
}
