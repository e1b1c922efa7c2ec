//! # mkvstrip-av
//!
//! mkvmerge integration for stripping unwanted tracks from Matroska files.
//!
//! This crate provides functionality for:
//! - Identifying the tracks of a file from mkvmerge's JSON report
//! - Remuxing a file with a track selection while relaying progress
//! - Replacing the original with the remuxed output, keeping its timestamps
//!
//! ## Features
//!
//! - `tracing` (default) - Enable tracing support
//!
//! ## Example
//!
//! ```no_run
//! use mkvstrip_av::{Mkvmerge, Muxer};
//! use std::path::Path;
//!
//! let mkvmerge = Mkvmerge::discover(None)?;
//! let info = mkvmerge.identify(Path::new("/path/to/video.mkv"))?;
//! for track in &info.tracks {
//!     println!("{}", track);
//! }
//! # Ok::<(), mkvstrip_av::Error>(())
//! ```

pub mod actions;
mod command;
mod error;
pub mod muxer;
pub mod probe;
pub mod tools;
pub mod workspace;

// Re-exports
pub use actions::{StripPlan, TrackSelection};
pub use command::{ToolCommand, ToolOutput};
pub use error::{Error, Result};
pub use muxer::{Mkvmerge, Muxer};
pub use probe::{MediaInfo, Track, TrackId, TrackType, UNDETERMINED_LANGUAGE};
pub use tools::{locate_tool, tool_version, DEFAULT_MKVMERGE_BIN};
pub use workspace::Workspace;
