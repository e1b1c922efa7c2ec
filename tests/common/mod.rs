//! Shared test harness for integration tests.
//!
//! Provides [`FakeMuxer`], an in-memory stand-in for mkvmerge that records
//! every call, and helpers for building media libraries in a temp dir.

#![allow(dead_code)]

use mkvstrip_av::{
    Error, MediaInfo, Muxer, Result, StripPlan, Track, TrackSelection, TrackType,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A call made against the fake muxer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Identify(PathBuf),
    Strip(StripPlan),
}

/// Muxer that serves track lists from memory.
///
/// A successful strip writes a smaller output file and updates the stored
/// tracks of the input, so a second run sees the stripped file.
#[derive(Default)]
pub struct FakeMuxer {
    files: Mutex<HashMap<PathBuf, Vec<Track>>>,
    broken: HashSet<PathBuf>,
    fail_strip: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeMuxer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `tracks` for `path`.
    pub fn with_file(self, path: &Path, tracks: Vec<Track>) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), tracks);
        self
    }

    /// Fail identification of `path`.
    pub fn with_broken_file(mut self, path: &Path) -> Self {
        self.broken.insert(path.to_path_buf());
        self
    }

    /// Fail every strip after writing a partial output.
    pub fn failing_strips(mut self) -> Self {
        self.fail_strip = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn strips(&self) -> Vec<StripPlan> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Strip(plan) => Some(plan),
                Call::Identify(_) => None,
            })
            .collect()
    }

    pub fn identified(&self) -> Vec<PathBuf> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Identify(path) => Some(path),
                Call::Strip(_) => None,
            })
            .collect()
    }
}

impl Muxer for FakeMuxer {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn identify(&self, path: &Path) -> Result<MediaInfo> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Identify(path.to_path_buf()));

        if self.broken.contains(path) {
            return Err(Error::tool_failed("fake", "exited with status 2"));
        }

        let tracks = self
            .files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| Error::parse_error("fake", "no such file"))?;

        Ok(MediaInfo {
            file_path: path.to_path_buf(),
            tracks,
        })
    }

    fn strip(&self, plan: &StripPlan, on_progress: &mut dyn FnMut(&str)) -> Result<()> {
        self.calls.lock().unwrap().push(Call::Strip(plan.clone()));

        on_progress("Progress: 50%");
        if self.fail_strip {
            std::fs::write(&plan.output, b"partial")?;
            return Err(Error::tool_failed("fake", "exited with status 2"));
        }
        on_progress("Progress: 100%");

        let mut files = self.files.lock().unwrap();
        let tracks = files.get(&plan.input).cloned().unwrap_or_default();
        let kept: Vec<Track> = tracks
            .into_iter()
            .filter(|track| retained(plan.selection(track.track_type), track))
            .collect();
        files.insert(plan.input.clone(), kept);

        std::fs::write(&plan.output, b"stripped")?;
        Ok(())
    }
}

fn retained(selection: Option<&TrackSelection>, track: &Track) -> bool {
    match selection {
        None => true,
        Some(TrackSelection::DropAll) => false,
        Some(TrackSelection::Retain(ids)) => ids.contains(&track.id),
    }
}

pub fn video(id: u64) -> Track {
    Track::new(id, TrackType::Video, "HEVC/H.265/MPEG-H", None)
}

pub fn audio(id: u64, language: &str) -> Track {
    Track::new(id, TrackType::Audio, "AC-3", Some(language))
}

pub fn subtitle(id: u64, language: &str) -> Track {
    Track::new(id, TrackType::Subtitle, "SubRip/SRT", Some(language))
}

/// Create `path` with placeholder contents larger than any stripped output.
pub fn write_media(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"original matroska contents").unwrap();
}
