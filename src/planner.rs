//! Translate a file's track selection into a strip plan.

use crate::selection::{FileSelection, TrackDecision};
use mkvstrip_av::{StripPlan, Track, TrackSelection, TrackType, Workspace};

/// Build the plan for remuxing the workspace input into its temporary
/// output.
///
/// A category gets a directive only when its removals would be applied.
/// Retained tracks keep their order and the first becomes the default.
/// Subtitles with nothing to keep are dropped entirely when the selection
/// allows it. Untouched categories pass through unchanged.
pub fn build_plan(workspace: &Workspace, selection: &FileSelection) -> StripPlan {
    let mut plan = StripPlan::new(workspace);

    if selection.strips_audio() {
        plan = plan.select(TrackType::Audio, retain(&selection.audio));
    }

    if selection.strips_subtitles() {
        let subtitles = if selection.subtitles.keep.is_empty() {
            TrackSelection::DropAll
        } else {
            retain(&selection.subtitles)
        };
        plan = plan.select(TrackType::Subtitle, subtitles);
    }

    plan
}

fn retain(decision: &TrackDecision) -> TrackSelection {
    TrackSelection::Retain(decision.keep.iter().map(|t| t.id.clone()).collect())
}

/// Human-readable description of what the plan keeps and removes, one line
/// per entry.
pub fn describe(selection: &FileSelection) -> Vec<String> {
    let mut lines = Vec::new();
    let categories = [
        ("audio", &selection.audio, selection.strips_audio()),
        ("subtitle", &selection.subtitles, selection.strips_subtitles()),
    ];

    for (label, decision, applied) in categories {
        if !applied {
            continue;
        }
        lines.push(format!("Retaining {} track(s):", label));
        lines.extend(decision.keep.iter().map(indent));
        lines.push(format!("Removing {} track(s):", label));
        lines.extend(decision.remove.iter().map(indent));
        lines.push("----------------------------".to_string());
    }

    lines
}

fn indent(track: &Track) -> String {
    format!("    {}", track)
}
