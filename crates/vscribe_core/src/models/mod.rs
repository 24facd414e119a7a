//! Data models for videoscribe.
//!
//! This module contains the core data structures used throughout the
//! pipeline:
//! - Enums for device selection
//! - Media structures (discovered video files)

mod enums;
mod media;

pub use enums::DeviceRequest;
pub use media::VideoFile;
