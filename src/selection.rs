//! Track classification and the remux decision.

use crate::languages::LanguageSet;
use mkvstrip_av::{MediaInfo, Track, TrackType};

/// The tracks of one category split into those to keep and those to remove.
///
/// Both lists keep the order the tracks have in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDecision {
    pub keep: Vec<Track>,
    pub remove: Vec<Track>,
}

impl TrackDecision {
    /// Whether this category has anything to remove.
    pub fn has_removals(&self) -> bool {
        !self.remove.is_empty()
    }

    /// Whether a remux would change this category.
    ///
    /// Removals are applied when something is left to keep, or when
    /// `allow_drop_all` permits removing every track of the category.
    pub fn is_actionable(&self, allow_drop_all: bool) -> bool {
        self.has_removals() && (!self.keep.is_empty() || allow_drop_all)
    }
}

/// Partition the tracks of `track_type`.
///
/// A track is kept when its language is wanted, unless `remove_commentary`
/// is set and the track is a commentary.
pub fn classify(
    tracks: &[Track],
    track_type: TrackType,
    wanted: &LanguageSet,
    remove_commentary: bool,
) -> TrackDecision {
    let mut decision = TrackDecision::default();
    for track in tracks.iter().filter(|t| t.track_type == track_type) {
        let commentary = remove_commentary && track.is_commentary();
        if wanted.contains(&track.language) && !commentary {
            decision.keep.push(track.clone());
        } else {
            decision.remove.push(track.clone());
        }
    }
    decision
}

/// Classification of one file, computed once and reused for the remux
/// decision, the plan and the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub audio: TrackDecision,
    pub subtitles: TrackDecision,
    /// Remove all subtitles when none are wanted.
    pub drop_all_subtitles: bool,
}

impl FileSelection {
    /// Classify the audio and subtitle tracks of `info`.
    pub fn new(
        info: &MediaInfo,
        audio_languages: &LanguageSet,
        subtitle_languages: &LanguageSet,
        remove_commentary: bool,
        drop_all_subtitles: bool,
    ) -> Self {
        Self {
            audio: classify(
                &info.tracks,
                TrackType::Audio,
                audio_languages,
                remove_commentary,
            ),
            subtitles: classify(
                &info.tracks,
                TrackType::Subtitle,
                subtitle_languages,
                remove_commentary,
            ),
            drop_all_subtitles,
        }
    }

    /// Whether the file has any audio track at all.
    pub fn has_audio(&self) -> bool {
        !self.audio.keep.is_empty() || !self.audio.remove.is_empty()
    }

    /// Whether every audio track is unwanted, so stripping would leave the
    /// file silent.
    pub fn all_audio_unwanted(&self) -> bool {
        self.has_audio() && self.audio.keep.is_empty()
    }

    /// Whether the remux would change the audio tracks.
    pub fn strips_audio(&self) -> bool {
        self.audio.is_actionable(false)
    }

    /// Whether the remux would change the subtitle tracks.
    pub fn strips_subtitles(&self) -> bool {
        self.subtitles.is_actionable(self.drop_all_subtitles)
    }

    /// Whether the file needs to be remuxed.
    ///
    /// Files keeping no audio track are never remuxed. Otherwise a remux is
    /// needed when audio tracks are removed or a subtitle removal would be
    /// applied. Subtitle removals that the plan would not carry out are not
    /// counted, so running again over an already stripped file never remuxes.
    pub fn remux_required(&self) -> bool {
        (!self.has_audio() || !self.audio.keep.is_empty())
            && (self.audio.has_removals() || self.strips_subtitles())
    }
}
