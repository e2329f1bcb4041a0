//! Silence-based audio splitting

pub mod silence;

pub use silence::{detect_nonsilent, detect_silence, split_on_silence, SplitterConfig, TimeRange};
