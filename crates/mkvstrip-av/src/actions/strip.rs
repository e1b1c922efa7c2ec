//! Track stripping operations.

use crate::command::ToolCommand;
use crate::probe::{TrackId, TrackType};
use crate::tools::MKVMERGE;
use crate::{Error, Result, Workspace};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// What to do with the tracks of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSelection {
    /// Keep only these tracks. The first one becomes the default track.
    Retain(Vec<TrackId>),
    /// Drop every track of the category.
    DropAll,
}

/// Directive describing a track-strip remux.
///
/// Categories without a selection pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripPlan {
    /// Source file.
    pub input: PathBuf,
    /// Temporary output, never the source itself.
    pub output: PathBuf,
    /// Title written into the output container.
    pub title: String,
    /// Audio track selection.
    pub audio: Option<TrackSelection>,
    /// Subtitle track selection.
    pub subtitles: Option<TrackSelection>,
}

impl StripPlan {
    /// Create an empty plan targeting the workspace output.
    pub fn new(workspace: &Workspace) -> Self {
        Self {
            input: workspace.input().to_path_buf(),
            output: workspace.output().to_path_buf(),
            title: workspace.title(),
            audio: None,
            subtitles: None,
        }
    }

    /// Set the selection for a category. Video selections are ignored.
    pub fn select(mut self, track_type: TrackType, selection: TrackSelection) -> Self {
        match track_type {
            TrackType::Audio => self.audio = Some(selection),
            TrackType::Subtitle => self.subtitles = Some(selection),
            TrackType::Video => {}
        }
        self
    }

    /// Selection for a category, if any.
    pub fn selection(&self, track_type: TrackType) -> Option<&TrackSelection> {
        match track_type {
            TrackType::Audio => self.audio.as_ref(),
            TrackType::Subtitle => self.subtitles.as_ref(),
            TrackType::Video => None,
        }
    }

    /// Whether the plan changes any tracks at all.
    pub fn is_empty(&self) -> bool {
        self.audio.is_none() && self.subtitles.is_none()
    }

    /// Render the plan as mkvmerge arguments.
    pub fn mkvmerge_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--output".into(),
            self.output.clone().into_os_string(),
            "--title".into(),
            self.title.clone().into(),
        ];

        for (track_type, option) in [
            (TrackType::Audio, "--audio-tracks"),
            (TrackType::Subtitle, "--subtitle-tracks"),
        ] {
            match self.selection(track_type) {
                Some(TrackSelection::Retain(ids)) if !ids.is_empty() => {
                    for (count, id) in ids.iter().enumerate() {
                        let flag = if count == 0 { "1" } else { "0" };
                        args.push("--default-track-flag".into());
                        args.push(format!("{}:{}", id, flag).into());
                    }
                    let ids: Vec<&str> = ids.iter().map(TrackId::as_str).collect();
                    args.push(option.into());
                    args.push(ids.join(",").into());
                }
                Some(TrackSelection::Retain(_)) | Some(TrackSelection::DropAll) => {
                    args.push(no_tracks_option(track_type).into());
                }
                None => {}
            }
        }

        args.push(self.input.clone().into_os_string());
        args
    }
}

fn no_tracks_option(track_type: TrackType) -> &'static str {
    match track_type {
        TrackType::Audio => "--no-audio",
        TrackType::Subtitle => "--no-subtitles",
        TrackType::Video => "--no-video",
    }
}

/// Run a strip plan through mkvmerge.
///
/// Progress lines are relayed to `on_progress` while mkvmerge runs. A partial
/// output left behind by a failure is not removed here.
pub fn strip_tracks(
    mkvmerge_bin: &Path,
    plan: &StripPlan,
    on_progress: &mut dyn FnMut(&str),
) -> Result<()> {
    if plan.output == plan.input {
        return Err(Error::InvalidInput(format!(
            "Refusing to remux {} onto itself",
            plan.input.display()
        )));
    }

    #[cfg(feature = "tracing")]
    tracing::info!("Stripping tracks from {}", plan.input.display());

    let output = ToolCommand::new(mkvmerge_bin)
        .args(plan.mkvmerge_args())
        .execute_with_progress(on_progress)?;

    // mkvmerge returns 0 for success, 1 for warnings, 2 for errors
    match output.status.code() {
        Some(0) | Some(1) => {
            #[cfg(feature = "tracing")]
            tracing::info!("Track stripping complete");
            Ok(())
        }
        _ => Err(Error::tool_failed(
            MKVMERGE,
            format!("exited with status {}: {}", output.status, output.stdout.trim()),
        )),
    }
}
