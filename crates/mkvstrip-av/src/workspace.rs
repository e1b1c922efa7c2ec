//! Workspace management for a single remux.

use crate::{Error, Result};
use filetime::FileTime;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix appended to the source path to form the remux output path.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Workspace for remuxing one file.
///
/// The output is always a sibling of the input (`<input>.tmp`) so that the
/// final replace is a rename within one filesystem, and the input is never
/// written to directly.
///
/// # Example
///
/// ```no_run
/// use mkvstrip_av::Workspace;
///
/// let workspace = Workspace::new("/path/to/input.mkv")?;
/// // Remux into workspace.output(), then:
/// workspace.finalize(true)?;
/// # Ok::<(), mkvstrip_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Workspace {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl Workspace {
    /// Create a new workspace for processing a file.
    pub fn new<P: AsRef<Path>>(input: P) -> Result<Self> {
        let input = input.as_ref();

        if input.file_name().is_none() {
            return Err(Error::InvalidInput(format!(
                "Invalid input file path: {}",
                input.display()
            )));
        }

        let mut output: OsString = input.as_os_str().to_os_string();
        output.push(TEMP_SUFFIX);

        Ok(Self {
            input_path: input.to_path_buf(),
            output_path: PathBuf::from(output),
        })
    }

    /// Get the input file path.
    pub fn input(&self) -> &Path {
        &self.input_path
    }

    /// Get the output file path.
    pub fn output(&self) -> &Path {
        &self.output_path
    }

    /// Title derived from the input file name without its extension.
    pub fn title(&self) -> String {
        self.input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Replace the input with the remuxed output.
    ///
    /// The input's access and modification times are copied onto the output
    /// first when `preserve_timestamps` is set. The input is then deleted and
    /// the output renamed into its place. If the input cannot be deleted, the
    /// output is removed and the input stays untouched. If the rename fails
    /// after the input was deleted, the output is kept at its temporary path
    /// since it is then the only copy.
    pub fn finalize(self, preserve_timestamps: bool) -> Result<PathBuf> {
        if !self.output_path.exists() {
            return Err(Error::Workspace(format!(
                "Output file does not exist: {}",
                self.output_path.display()
            )));
        }

        if preserve_timestamps {
            if let Err(e) = self.copy_timestamps() {
                self.cleanup();
                return Err(e);
            }
        }

        if let Err(e) = std::fs::remove_file(&self.input_path) {
            self.cleanup();
            return Err(Error::replace(
                &self.input_path,
                format!("could not delete original: {}", e),
            ));
        }

        std::fs::rename(&self.output_path, &self.input_path).map_err(|e| {
            Error::replace(
                &self.input_path,
                format!(
                    "could not rename {} into place: {}",
                    self.output_path.display(),
                    e
                ),
            )
        })?;

        Ok(self.input_path)
    }

    fn copy_timestamps(&self) -> Result<()> {
        let metadata = std::fs::metadata(&self.input_path)?;
        let atime = FileTime::from_last_access_time(&metadata);
        let mtime = FileTime::from_last_modification_time(&metadata);
        filetime::set_file_times(&self.output_path, atime, mtime)?;
        Ok(())
    }

    /// Remove the output if it exists. Returns whether a file was removed.
    pub fn cleanup(&self) -> bool {
        if !self.output_path.exists() {
            return false;
        }

        match std::fs::remove_file(&self.output_path) {
            Ok(()) => true,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Failed to remove {}: {}", self.output_path.display(), _e);
                false
            }
        }
    }
}
