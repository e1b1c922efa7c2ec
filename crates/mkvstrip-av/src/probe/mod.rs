//! Media file probing module.
//!
//! Track metadata comes from mkvmerge's JSON identification report and is
//! mapped onto strongly-typed [`Track`] values.

mod mkvmerge;
mod types;

pub use mkvmerge::{identify_with_mkvmerge, parse_identify_json};
pub use types::*;
