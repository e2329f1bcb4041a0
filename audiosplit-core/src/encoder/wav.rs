use crate::core::{AudioClip, Channels};
use crate::error::{SplitError, SplitResult};
use hound::{WavSpec, WavWriter};
use std::path::Path;

/// WAV audio encoder (32-bit float)
pub struct WavEncoder {
    writer: Option<WavWriter<std::io::BufWriter<std::fs::File>>>,
    sample_rate: u32,
    channels: Channels,
}

impl WavEncoder {
    /// Create a new WAV encoder to file
    pub fn new<P: AsRef<Path>>(
        path: P,
        sample_rate: u32,
        channels: Channels,
    ) -> SplitResult<Self> {
        let spec = WavSpec {
            channels: channels.count() as u16,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };

        let writer =
            WavWriter::create(path, spec).map_err(|e| SplitError::Encode(e.to_string()))?;

        Ok(WavEncoder {
            writer: Some(writer),
            sample_rate,
            channels,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }
}

impl super::Encoder for WavEncoder {
    fn encode(&mut self, clip: &AudioClip) -> SplitResult<()> {
        if clip.sample_rate() != self.sample_rate {
            return Err(SplitError::InvalidSampleRate {
                rate: clip.sample_rate(),
            });
        }

        if clip.channels() != self.channels {
            return Err(SplitError::InvalidChannels {
                expected: self.channels.count(),
                got: clip.channels().count(),
            });
        }

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| SplitError::Encode("Encoder already finalized".to_string()))?;

        for &sample in clip.samples() {
            writer
                .write_sample(sample)
                .map_err(|e| SplitError::Encode(e.to_string()))?;
        }

        Ok(())
    }

    fn finalize(&mut self) -> SplitResult<()> {
        if let Some(writer) = self.writer.take() {
            writer
                .finalize()
                .map_err(|e| SplitError::Encode(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use tempfile::NamedTempFile;

    #[test]
    fn test_wav_encoder_creation() {
        let temp_file = NamedTempFile::new().unwrap();
        let encoder = WavEncoder::new(temp_file.path(), 44100, Channels::Stereo);
        assert!(encoder.is_ok());
    }

    #[test]
    fn test_wav_encoder_write() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 44100, Channels::Mono).unwrap();

        let samples = vec![0.0, 0.1, -0.1, 0.5];
        let clip = AudioClip::new(samples, 44100, Channels::Mono).unwrap();

        assert!(encoder.encode(&clip).is_ok());
        assert!(encoder.finalize().is_ok());

        // The finalized file is a readable WAV with the samples intact
        let reader = hound::WavReader::open(temp_file.path()).unwrap();
        assert_eq!(reader.len(), 4);
    }

    #[test]
    fn test_wav_encoder_invalid_sample_rate() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 44100, Channels::Mono).unwrap();

        let clip = AudioClip::new(vec![0.0, 0.1], 48000, Channels::Mono).unwrap();
        assert!(encoder.encode(&clip).is_err());
    }

    #[test]
    fn test_wav_encoder_invalid_channels() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut encoder = WavEncoder::new(temp_file.path(), 44100, Channels::Mono).unwrap();

        let clip = AudioClip::new(vec![0.0, 0.1, 0.2, 0.3], 44100, Channels::Stereo).unwrap();
        assert!(encoder.encode(&clip).is_err());
    }
}
