//! The [`Muxer`] trait defining the identify/remux contract.

use crate::actions::{strip_tracks, StripPlan};
use crate::probe::{identify_with_mkvmerge, MediaInfo};
use crate::tools::{locate_tool, tool_version, DEFAULT_MKVMERGE_BIN, MKVMERGE};
use crate::Result;
use std::path::{Path, PathBuf};

/// An external tool able to report a file's tracks and remux it with a
/// track selection.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait Muxer: Send + Sync {
    /// Human-readable name identifying this muxer implementation.
    fn name(&self) -> &'static str;

    /// Report the tracks of the file at `path`.
    fn identify(&self, path: &Path) -> Result<MediaInfo>;

    /// Produce `plan.output` from `plan.input` according to the plan.
    ///
    /// Progress lines are passed to `on_progress` while the tool runs.
    fn strip(&self, plan: &StripPlan, on_progress: &mut dyn FnMut(&str)) -> Result<()>;
}

/// [`Muxer`] backed by the MKVToolNix `mkvmerge` binary.
#[derive(Debug, Clone)]
pub struct Mkvmerge {
    bin: PathBuf,
}

impl Mkvmerge {
    /// Use the mkvmerge binary at `bin` without checking it.
    pub fn new(bin: impl Into<PathBuf>) -> Self {
        Self { bin: bin.into() }
    }

    /// Locate mkvmerge at `configured`, or at the platform default.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ToolNotFound`] if no usable binary is found.
    pub fn discover(configured: Option<&Path>) -> Result<Self> {
        let bin = configured.unwrap_or_else(|| Path::new(DEFAULT_MKVMERGE_BIN));
        locate_tool(bin).map(Self::new)
    }

    /// Path of the binary in use.
    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// First line of `mkvmerge --version`, if it runs.
    pub fn version(&self) -> Option<String> {
        tool_version(&self.bin)
    }
}

impl Muxer for Mkvmerge {
    fn name(&self) -> &'static str {
        MKVMERGE
    }

    fn identify(&self, path: &Path) -> Result<MediaInfo> {
        identify_with_mkvmerge(&self.bin, path)
    }

    fn strip(&self, plan: &StripPlan, on_progress: &mut dyn FnMut(&str)) -> Result<()> {
        strip_tracks(&self.bin, plan, on_progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use assert_matches::assert_matches;

    #[test]
    fn test_discover_configured_binary() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mkvmerge = Mkvmerge::discover(Some(file.path())).unwrap();
        assert_eq!(mkvmerge.bin(), file.path());
        assert_eq!(mkvmerge.name(), "mkvmerge");
    }

    #[test]
    fn test_discover_missing_binary() {
        let result = Mkvmerge::discover(Some(Path::new("/nonexistent/mkvmerge_12345")));
        assert_matches!(result, Err(Error::ToolNotFound { .. }));
    }

    #[test]
    fn test_identify_missing_file() {
        let mkvmerge = Mkvmerge::new("mkvmerge");
        let result = mkvmerge.identify(Path::new("/nonexistent/movie.mkv"));
        assert_matches!(result, Err(Error::FileNotFound { .. }));
    }
}
