//! Audio decoder implementations

pub mod symphonia;

pub use symphonia::SymphoniaDecoder;

use crate::core::AudioClip;
use crate::error::SplitResult;
use std::path::Path;

/// Decode an entire file into memory
pub fn decode_file<P: AsRef<Path>>(path: P) -> SplitResult<AudioClip> {
    SymphoniaDecoder::from_file(path)?.decode_all()
}
