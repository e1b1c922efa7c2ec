//! Media processing actions.
//!
//! Only track stripping is needed: tracks are removed by remuxing the file
//! with a track selection, never by re-encoding.

mod strip;

pub use strip::{strip_tracks, StripPlan, TrackSelection};
