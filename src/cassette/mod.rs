//! YAML cassettes of port interactions, for recording a comparison once and
//! replaying it without the directories.

pub mod format;
pub mod recorder;
pub mod replayer;
