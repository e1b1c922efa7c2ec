use crate::languages::LanguageSet;
use mkvstrip_av::DEFAULT_MKVMERGE_BIN;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings read from a TOML config file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Path to the mkvmerge executable
    #[serde(default)]
    pub mkvmerge_bin: Option<PathBuf>,

    /// Languages always retained, in addition to those given on the command line
    #[serde(default)]
    pub languages: Vec<String>,

    /// Subtitle languages, used when --subs-language is not given
    #[serde(default)]
    pub subs_languages: Option<Vec<String>>,

    #[serde(default)]
    pub no_subtitles: bool,

    #[serde(default)]
    pub remove_commentary: bool,

    /// Copy access and modification times onto the remuxed file (default: true)
    #[serde(default = "default_preserve_timestamps")]
    pub preserve_timestamps: bool,
}

fn default_preserve_timestamps() -> bool {
    true
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            mkvmerge_bin: None,
            languages: Vec::new(),
            subs_languages: None,
            no_subtitles: false,
            remove_commentary: false,
            preserve_timestamps: default_preserve_timestamps(),
        }
    }
}

/// Options given on the command line for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub mkvmerge_bin: Option<PathBuf>,
    pub languages: Vec<String>,
    pub subs_languages: Option<Vec<String>>,
    pub no_subtitles: bool,
    pub remove_commentary: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub recurse: bool,
}

/// Effective settings for a run, fixed once processing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mkvmerge_bin: PathBuf,
    /// Languages retained for audio, and for subtitles unless
    /// `subs_languages` is set. Always includes `und`.
    pub languages: LanguageSet,
    pub subs_languages: Option<LanguageSet>,
    /// Drop every subtitle when none of them is wanted.
    pub no_subtitles: bool,
    pub remove_commentary: bool,
    pub preserve_timestamps: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub recurse: bool,
}

impl Config {
    /// Config keeping `languages` (plus `und`) with every option off except
    /// timestamp preservation.
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut langs = LanguageSet::undetermined();
        langs.extend(languages);
        Self {
            mkvmerge_bin: PathBuf::from(DEFAULT_MKVMERGE_BIN),
            languages: langs,
            subs_languages: None,
            no_subtitles: false,
            remove_commentary: false,
            preserve_timestamps: true,
            dry_run: false,
            verbose: false,
            recurse: false,
        }
    }

    /// Merge command-line options over file settings.
    ///
    /// File languages are added to the command-line ones. Subtitle languages
    /// from the command line replace those from the file. Flags are on when
    /// either source turns them on.
    pub fn merge(file: FileConfig, options: RunOptions) -> Self {
        let mut config = Self::new(file.languages.iter().chain(&options.languages));

        config.mkvmerge_bin = options
            .mkvmerge_bin
            .or(file.mkvmerge_bin)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MKVMERGE_BIN));
        config.subs_languages = options
            .subs_languages
            .or(file.subs_languages)
            .map(LanguageSet::from_codes);
        config.no_subtitles = options.no_subtitles || file.no_subtitles;
        config.remove_commentary = options.remove_commentary || file.remove_commentary;
        config.preserve_timestamps = file.preserve_timestamps;
        config.dry_run = options.dry_run;
        config.verbose = options.verbose;
        config.recurse = options.recurse;
        config
    }

    /// Languages retained for subtitles.
    pub fn subtitle_languages(&self) -> &LanguageSet {
        self.subs_languages.as_ref().unwrap_or(&self.languages)
    }
}
