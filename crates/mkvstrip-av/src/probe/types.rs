//! Track and media information types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Language code used when a track carries no language metadata.
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// Information about a Matroska file as reported by the identification tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// Path to the media file.
    pub file_path: PathBuf,
    /// All tracks in the order the tool reported them.
    pub tracks: Vec<Track>,
}

/// Kind of elementary stream.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrackType {
    Video,
    Audio,
    Subtitle,
}

/// Track identifier assigned by the tool, unique within one file.
///
/// mkvmerge reports numbers, but the value is only ever handed back to the
/// tool, so it is stored in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

/// A single track of a media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Tool-assigned identifier.
    pub id: TrackId,
    /// Video, audio or subtitle.
    pub track_type: TrackType,
    /// Codec label (e.g. "AC-3"), for display only.
    pub codec: String,
    /// Language code, `und` when unknown.
    pub language: String,
    /// Track name, if any.
    pub name: Option<String>,
}

impl TrackType {
    /// Map an mkvmerge track type string.
    pub fn from_mkvmerge(value: &str) -> Option<Self> {
        match value {
            "video" => Some(TrackType::Video),
            "audio" => Some(TrackType::Audio),
            "subtitles" | "subtitle" => Some(TrackType::Subtitle),
            _ => None,
        }
    }

    /// Lowercase name used in output and in mkvmerge option names.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackType::Video => "video",
            TrackType::Audio => "audio",
            TrackType::Subtitle => "subtitle",
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for TrackId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Track {
    /// Create a track, substituting `und` for a missing or blank language.
    pub fn new(
        id: impl Into<TrackId>,
        track_type: TrackType,
        codec: impl Into<String>,
        language: Option<&str>,
    ) -> Self {
        let language = language
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(UNDETERMINED_LANGUAGE)
            .to_string();

        Self {
            id: id.into(),
            track_type,
            codec: codec.into(),
            language,
            name: None,
        }
    }

    /// Attach a track name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the track name marks it as a commentary track.
    pub fn is_commentary(&self) -> bool {
        self.name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains("commentary"))
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track #{}: {} - {}", self.id, self.language, self.codec)?;
        if let Some(ref name) = self.name {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_display() {
        let track = Track::new(2u64, TrackType::Audio, "AC-3", Some("eng"));
        assert_eq!(track.to_string(), "Track #2: eng - AC-3");

        let named = track.with_name("Director's Commentary");
        assert_eq!(
            named.to_string(),
            "Track #2: eng - AC-3 (Director's Commentary)"
        );
    }

    #[test]
    fn test_missing_language_is_undetermined() {
        let track = Track::new(0u64, TrackType::Video, "AVC", None);
        assert_eq!(track.language, UNDETERMINED_LANGUAGE);

        let blank = Track::new(1u64, TrackType::Audio, "AAC", Some("  "));
        assert_eq!(blank.language, UNDETERMINED_LANGUAGE);
    }

    #[test]
    fn test_commentary_detection() {
        let plain = Track::new(1u64, TrackType::Audio, "AAC", Some("eng"));
        assert!(!plain.is_commentary());
        assert!(plain.clone().with_name("COMMENTARY track").is_commentary());
        assert!(!plain.with_name("Stereo").is_commentary());
    }
}
