//! mkvmerge-based track identification.
//!
//! mkvmerge reports every track of a Matroska file in its JSON
//! identification format. The raw output is validated here so that a
//! malformed report fails with a descriptive error instead of surfacing as a
//! missing field somewhere in the processing pipeline.

use super::types::*;
use crate::command::ToolCommand;
use crate::tools::MKVMERGE;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct IdentifyOutput {
    tracks: Option<Vec<IdentifyTrack>>,
}

#[derive(Debug, Deserialize)]
struct IdentifyTrack {
    id: Option<RawTrackId>,
    #[serde(rename = "type")]
    track_type: Option<String>,
    codec: Option<String>,
    #[serde(default)]
    properties: Option<TrackProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTrackId {
    Number(u64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct TrackProperties {
    language: Option<String>,
    track_name: Option<String>,
}

/// Identify the tracks of a Matroska file by running mkvmerge.
///
/// # Errors
///
/// Returns [`Error::ToolFailed`] when mkvmerge exits with a non-zero status and
/// [`Error::ParseError`] when its report is not valid identification JSON.
pub fn identify_with_mkvmerge(mkvmerge_bin: &Path, path: &Path) -> Result<MediaInfo> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }

    let output = ToolCommand::new(mkvmerge_bin)
        .args(["--identify", "--identification-format", "json"])
        .arg(path)
        .execute()?;

    parse_identify_json(path, &output.stdout)
}

/// Parse mkvmerge identification JSON into [`MediaInfo`].
pub fn parse_identify_json(path: &Path, json: &str) -> Result<MediaInfo> {
    let output: IdentifyOutput = serde_json::from_str(json)
        .map_err(|e| Error::parse_error(MKVMERGE, format!("invalid JSON: {}", e)))?;

    let raw_tracks = output
        .tracks
        .ok_or_else(|| Error::parse_error(MKVMERGE, "no 'tracks' array in identification"))?;

    let tracks = raw_tracks
        .into_iter()
        .enumerate()
        .map(|(position, raw)| parse_track(position, raw))
        .collect::<Result<Vec<_>>>()?;

    Ok(MediaInfo {
        file_path: path.to_path_buf(),
        tracks,
    })
}

fn parse_track(position: usize, raw: IdentifyTrack) -> Result<Track> {
    let missing = |field: &str| {
        Error::parse_error(
            MKVMERGE,
            format!("track at position {} is missing '{}'", position, field),
        )
    };

    let id = match raw.id.ok_or_else(|| missing("id"))? {
        RawTrackId::Number(n) => TrackId::from(n),
        RawTrackId::Text(s) if !s.trim().is_empty() => TrackId::new(s.trim()),
        RawTrackId::Text(_) => return Err(missing("id")),
    };

    let type_str = raw.track_type.ok_or_else(|| missing("type"))?;
    let track_type = TrackType::from_mkvmerge(&type_str).ok_or_else(|| {
        Error::parse_error(
            MKVMERGE,
            format!("track {} has unknown type '{}'", id, type_str),
        )
    })?;

    let codec = raw.codec.ok_or_else(|| missing("codec"))?;
    let properties = raw.properties.unwrap_or_default();

    let mut track = Track::new(id, track_type, codec, properties.language.as_deref());
    if let Some(name) = properties.track_name.filter(|n| !n.is_empty()) {
        track = track.with_name(name);
    }

    Ok(track)
}
