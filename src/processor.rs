//! File processing: identify, decide, remux and replace, one file at a time.

use crate::config::Config;
use crate::error::StripError;
use crate::languages::{self, LanguageCache};
use crate::planner;
use crate::scanner::ScanTarget;
use crate::selection::FileSelection;
use mkvstrip_av::{Muxer, Workspace};
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// What happened to a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Nothing to strip.
    Unchanged,
    /// Every audio track is unwanted; left as is.
    NoWantedAudio,
    /// A remux was needed but this is a dry run.
    Planned,
    /// The file was remuxed and replaced.
    Remuxed { bytes_saved: u64 },
}

/// Totals for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub remuxed: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,
    pub bytes_saved: u64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Unchanged | FileOutcome::NoWantedAudio => self.skipped += 1,
            FileOutcome::Planned => self.planned += 1,
            FileOutcome::Remuxed { bytes_saved } => {
                self.remuxed += 1;
                self.bytes_saved += bytes_saved;
            }
        }
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }

    pub fn processed(&self) -> usize {
        self.remuxed + self.planned + self.skipped + self.failed
    }
}

/// Runs the strip workflow against a [`Muxer`].
pub struct Processor<'a> {
    config: &'a Config,
    muxer: &'a dyn Muxer,
}

impl<'a> Processor<'a> {
    pub fn new(config: &'a Config, muxer: &'a dyn Muxer) -> Self {
        Self { config, muxer }
    }

    /// Process every Matroska file of a command-line path.
    ///
    /// Per-file failures are logged and counted; only an invalid path is
    /// returned as an error.
    pub fn process_path(&self, path: &Path, summary: &mut RunSummary) -> Result<(), StripError> {
        let target = ScanTarget::new(path)?;
        self.process_target(&target, summary);
        Ok(())
    }

    /// Process an already validated target.
    pub fn process_target(&self, target: &ScanTarget, summary: &mut RunSummary) {
        // Override files are read once per target walk
        let mut cache = LanguageCache::new();

        for file in target.discover(self.config.recurse) {
            match self.process_file(&target.root, &file, &mut cache) {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    error!("{}", e);
                    summary.record_failure();
                }
            }
        }
    }

    /// Process a single file below `root`.
    pub fn process_file(
        &self,
        root: &Path,
        file: &Path,
        cache: &mut LanguageCache,
    ) -> Result<FileOutcome, StripError> {
        if self.config.verbose {
            println!("Checking {}", file.display());
        }

        let info = self
            .muxer
            .identify(file)
            .map_err(|e| StripError::identify(file, e))?;

        let dir = file.parent().unwrap_or(root);
        let audio_langs = languages::resolve(root, dir, &self.config.languages, cache);
        let subtitle_langs =
            languages::resolve(root, dir, self.config.subtitle_languages(), cache);
        debug!(
            "Languages for {}: audio {{{}}}, subtitles {{{}}}",
            file.display(),
            audio_langs,
            subtitle_langs
        );

        let selection = FileSelection::new(
            &info,
            &audio_langs,
            &subtitle_langs,
            self.config.remove_commentary,
            self.config.no_subtitles,
        );

        if !selection.remux_required() {
            if selection.all_audio_unwanted() {
                warn!(
                    "No audio tracks match {{{}}} in {}, leaving it unchanged",
                    audio_langs,
                    file.display()
                );
                return Ok(FileOutcome::NoWantedAudio);
            }
            debug!("Nothing to strip from {}", file.display());
            return Ok(FileOutcome::Unchanged);
        }

        let workspace =
            Workspace::new(file).map_err(|e| StripError::InvalidInput(e.to_string()))?;
        let plan = planner::build_plan(&workspace, &selection);

        println!();
        println!("Remuxing: {}", file_name(file));
        println!("============================");
        for line in planner::describe(&selection) {
            println!("{}", line);
        }

        if self.config.dry_run {
            println!("Dry run 100%");
            return Ok(FileOutcome::Planned);
        }

        let original_size = file_size(file);

        let result = self.muxer.strip(&plan, &mut |line: &str| {
            print!("\r{}", line.trim());
            let _ = std::io::stdout().flush();
        });
        println!();

        if let Err(e) = result {
            if workspace.cleanup() {
                debug!("Removed partial output {}", workspace.output().display());
            }
            return Err(StripError::remux(file, e));
        }

        let new_size = file_size(workspace.output());
        workspace
            .finalize(self.config.preserve_timestamps)
            .map_err(|e| StripError::replace(file, e))?;

        let bytes_saved = original_size.saturating_sub(new_size);
        info!("Remuxed {} ({} bytes saved)", file.display(), bytes_saved);
        Ok(FileOutcome::Remuxed { bytes_saved })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
