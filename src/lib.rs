//! mkvstrip - strips unwanted audio and subtitle tracks from Matroska files
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod error;
pub mod languages;
pub mod planner;
pub mod processor;
pub mod scanner;
pub mod selection;
