//! Discovery of Matroska files to process.

use crate::error::StripError;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// Whether `path` has a `.mkv` extension, in any case.
pub fn is_mkv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mkv"))
}

/// A validated command-line path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    /// Canonical form of the given path.
    pub path: PathBuf,
    /// Directory that language resolution never goes above.
    pub root: PathBuf,
}

impl ScanTarget {
    /// Validate a command-line path.
    ///
    /// The path must exist. A file must carry a `.mkv` extension, and its
    /// parent directory becomes the root.
    pub fn new(path: &Path) -> Result<Self, StripError> {
        let canonical = path.canonicalize().map_err(|e| {
            StripError::InvalidInput(format!("{}: {}", path.display(), e))
        })?;

        if canonical.is_dir() {
            return Ok(Self {
                root: canonical.clone(),
                path: canonical,
            });
        }

        if !is_mkv(&canonical) {
            return Err(StripError::InvalidInput(format!(
                "{} is not a Matroska (.mkv) file",
                path.display()
            )));
        }

        let root = canonical
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| canonical.clone());
        Ok(Self {
            path: canonical,
            root,
        })
    }

    /// List the Matroska files of this target in processing order.
    ///
    /// A directory's files come before its subdirectories, and siblings are
    /// sorted by name. Without `recurse` only the directory's own files are
    /// listed. Symbolic links are followed.
    pub fn discover(&self, recurse: bool) -> Vec<PathBuf> {
        if !self.path.is_dir() {
            return vec![self.path.clone()];
        }

        let max_depth = if recurse { usize::MAX } else { 1 };
        WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by(files_first)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && is_mkv(entry.path()))
            .map(DirEntry::into_path)
            .collect()
    }
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"").unwrap();
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_is_mkv() {
        assert!(is_mkv(Path::new("movie.mkv")));
        assert!(is_mkv(Path::new("MOVIE.MKV")));
        assert!(!is_mkv(Path::new("movie.mkv.tmp")));
        assert!(!is_mkv(Path::new("movie.mp4")));
        assert!(!is_mkv(Path::new("mkv")));
    }

    #[test]
    fn test_discover_sorted_files_before_subdirectories() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        for name in ["b.mkv", "a.MKV", "z/c.mkv", "m/b.mkv", "m/a.mkv", "notes.txt", "x.mkv.tmp"] {
            touch(&root.join(name));
        }

        let target = ScanTarget::new(&root).unwrap();

        assert_eq!(
            names(&root, &target.discover(true)),
            vec!["a.MKV", "b.mkv", "m/a.mkv", "m/b.mkv", "z/c.mkv"]
        );
        assert_eq!(names(&root, &target.discover(false)), vec!["a.MKV", "b.mkv"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_follows_symlinked_files() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        touch(&root.join("store/real.mkv"));
        std::fs::create_dir(root.join("library")).unwrap();
        std::os::unix::fs::symlink(root.join("store/real.mkv"), root.join("library/linked.mkv"))
            .unwrap();

        let target = ScanTarget::new(&root.join("library")).unwrap();

        assert_eq!(
            target.discover(false),
            vec![root.join("library/linked.mkv")]
        );
    }

    #[test]
    fn test_file_target_uses_parent_as_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let file = root.join("movie.mkv");
        touch(&file);

        let target = ScanTarget::new(&file).unwrap();

        assert_eq!(target.root, root);
        assert_eq!(target.discover(false), vec![file]);
    }

    #[test]
    fn test_non_mkv_file_is_invalid() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("movie.mp4");
        touch(&file);

        assert_matches!(ScanTarget::new(&file), Err(StripError::InvalidInput(_)));
    }

    #[test]
    fn test_missing_path_is_invalid() {
        let dir = tempdir().unwrap();
        assert_matches!(
            ScanTarget::new(&dir.path().join("missing")),
            Err(StripError::InvalidInput(_))
        );
    }
}
