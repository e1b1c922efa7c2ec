//! Locating the mkvmerge binary.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Name of the MKVToolNix muxer binary.
pub const MKVMERGE: &str = "mkvmerge";

/// Default location of mkvmerge for this platform.
#[cfg(windows)]
pub const DEFAULT_MKVMERGE_BIN: &str = r"C:\Program Files\MKVToolNix\mkvmerge.exe";

/// Default location of mkvmerge for this platform.
#[cfg(not(windows))]
pub const DEFAULT_MKVMERGE_BIN: &str = MKVMERGE;

/// Resolve `bin` to an executable path.
///
/// An existing path is returned unchanged. Anything else, including a bare
/// name like `mkvmerge`, is searched for on `PATH`.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] when nothing matches.
pub fn locate_tool(bin: &Path) -> Result<PathBuf> {
    if bin.is_file() {
        return Ok(bin.to_path_buf());
    }
    which::which(bin).map_err(|_| Error::tool_not_found(bin.to_string_lossy()))
}

/// First line printed by `<bin> --version`, or `None` if it fails.
pub fn tool_version(bin: &Path) -> Option<String> {
    let output = Command::new(bin)
        .arg("--version")
        .stdin(Stdio::null())
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
