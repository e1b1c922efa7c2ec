//! Language preference resolution.
//!
//! The languages kept for a directory are the command-line languages plus
//! every language listed in override files found in that directory and each
//! of its ancestors up to the traversal root.

use mkvstrip_av::UNDETERMINED_LANGUAGE;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Recognized override file names. Only the first one present in a
/// directory is read.
pub const OVERRIDE_FILE_NAMES: [&str; 4] = ["lang", "langs", ".lang", ".langs"];

/// A set of wanted language codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSet(BTreeSet<String>);

impl LanguageSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set containing only the undetermined language.
    pub fn undetermined() -> Self {
        Self::from_codes([UNDETERMINED_LANGUAGE])
    }

    /// Build a set from language codes. Codes are trimmed and empty ones
    /// are dropped.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        set.extend(codes);
        set
    }

    /// Parse a comma-separated list such as `eng, fre,ger`.
    pub fn parse_csv(line: &str) -> Self {
        Self::from_codes(line.split(','))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Add every language of `other` to this set.
    pub fn union_with(&mut self, other: &LanguageSet) {
        self.0.extend(other.0.iter().cloned());
    }
}

impl<S: AsRef<str>> Extend<S> for LanguageSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for code in iter {
            let code = code.as_ref().trim();
            if !code.is_empty() {
                self.0.insert(code.to_string());
            }
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_codes(iter)
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.iter().collect();
        write!(f, "{}", codes.join(","))
    }
}

/// Parse the contents of an override file. Every line is a comma-separated
/// list and all lines are merged.
pub fn parse_override(content: &str) -> LanguageSet {
    content.lines().flat_map(|line| line.split(',')).collect()
}

/// Per-walk cache of the languages declared by each directory's override
/// file. A directory is read at most once for the lifetime of the cache.
#[derive(Debug, Default)]
pub struct LanguageCache {
    dirs: HashMap<PathBuf, LanguageSet>,
}

impl LanguageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Languages declared directly in `dir`, without its ancestors.
    pub fn declared(&mut self, dir: &Path) -> &LanguageSet {
        self.dirs
            .entry(dir.to_path_buf())
            .or_insert_with(|| read_override_dir(dir))
    }

    /// Number of directories read so far.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }
}

fn read_override_dir(dir: &Path) -> LanguageSet {
    let Some(path) = OVERRIDE_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
    else {
        return LanguageSet::new();
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let langs = parse_override(&content);
            debug!("Read languages {{{}}} from {}", langs, path.display());
            langs
        }
        Err(e) => {
            warn!("Ignoring unreadable language file {}: {}", path.display(), e);
            LanguageSet::new()
        }
    }
}

/// Resolve the wanted languages for `current`.
///
/// Starts from `base` and merges the override files of `current` and every
/// ancestor up to and including `root`. A directory outside `root` gets
/// `base` unchanged.
pub fn resolve(
    root: &Path,
    current: &Path,
    base: &LanguageSet,
    cache: &mut LanguageCache,
) -> LanguageSet {
    let mut langs = base.clone();
    for dir in current.ancestors().take_while(|dir| dir.starts_with(root)) {
        langs.union_with(cache.declared(dir));
    }
    langs
}
