//! Audio encoder implementations

pub mod mp3;
pub mod wav;

pub use mp3::Mp3Encoder;
pub use wav::WavEncoder;

use crate::core::{AudioClip, Channels};
use crate::error::SplitResult;
use std::path::Path;

/// Output format for exported segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// MP3 via an external ffmpeg process
    Mp3,
    /// 32-bit float WAV written in-process
    Wav,
}

impl ExportFormat {
    /// File extension for this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Mp3 => "mp3",
            ExportFormat::Wav => "wav",
        }
    }
}

/// Trait for audio encoders
pub trait Encoder {
    /// Encode a clip to the output
    fn encode(&mut self, clip: &AudioClip) -> SplitResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> SplitResult<()> {
        Ok(())
    }
}

/// Create an encoder writing the given format to `path`
pub fn for_format<P: AsRef<Path>>(
    format: ExportFormat,
    path: P,
    sample_rate: u32,
    channels: Channels,
) -> SplitResult<Box<dyn Encoder>> {
    match format {
        ExportFormat::Mp3 => {
            Mp3Encoder::new(path, sample_rate, channels).map(|e| Box::new(e) as Box<dyn Encoder>)
        }
        ExportFormat::Wav => {
            WavEncoder::new(path, sample_rate, channels).map(|e| Box::new(e) as Box<dyn Encoder>)
        }
    }
}
