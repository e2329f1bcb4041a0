use crate::error::{SplitError, SplitResult};
use std::time::Duration;

/// Channel configuration for audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono (1 channel)
    Mono = 1,
    /// Stereo (2 channels)
    Stereo = 2,
    /// Quad (4 channels)
    Quad = 4,
    /// 5.1 surround sound
    SurroundFivePointOne = 6,
    /// 7.1 surround sound
    SurroundSevenPointOne = 8,
}

impl Channels {
    /// Create Channels from channel count
    pub fn from_count(count: u32) -> SplitResult<Self> {
        match count {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            4 => Ok(Channels::Quad),
            6 => Ok(Channels::SurroundFivePointOne),
            8 => Ok(Channels::SurroundSevenPointOne),
            n => Err(SplitError::InvalidChannels {
                expected: 1,
                got: n,
            }),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u32 {
        *self as u32
    }

    /// Get channel layout name
    pub fn name(&self) -> &'static str {
        match self {
            Channels::Mono => "Mono",
            Channels::Stereo => "Stereo",
            Channels::Quad => "Quad",
            Channels::SurroundFivePointOne => "5.1 Surround",
            Channels::SurroundSevenPointOne => "7.1 Surround",
        }
    }
}

/// A fully decoded audio track held in memory.
///
/// Samples are interleaved `f32` in the range -1.0 to 1.0. The clip owns the
/// samples for the duration of one split run; segments produced by the
/// splitter are clips themselves, sliced out of the source.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Audio samples (interleaved for multiple channels)
    samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 44100, 48000, 16000)
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
}

impl AudioClip {
    /// Create a new clip from interleaved samples
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: Channels) -> SplitResult<Self> {
        if sample_rate == 0 {
            return Err(SplitError::InvalidSampleRate { rate: sample_rate });
        }

        if samples.len() % channels.count() as usize != 0 {
            return Err(SplitError::Decode(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        Ok(AudioClip {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get owned samples (consumes clip)
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get number of samples per channel
    pub fn samples_per_channel(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    /// Get total duration of the clip
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples_per_channel() as f64 / self.sample_rate as f64)
    }

    /// Get total length in whole milliseconds, rounded up so that a final
    /// partial frame is still addressable
    pub fn len_ms(&self) -> u64 {
        let per_channel = self.samples_per_channel() as u64;
        let rate = self.sample_rate as u64;
        (per_channel * 1000).div_ceil(rate)
    }

    /// Check if clip is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Interleaved sample offset for a millisecond position, clamped to the
    /// end of the clip
    fn ms_to_offset(&self, ms: u64) -> usize {
        let per_channel = (ms * self.sample_rate as u64 / 1000) as usize;
        let per_channel = per_channel.min(self.samples_per_channel());
        per_channel * self.channels.count() as usize
    }

    /// Extract the sub-clip covering `start_ms..end_ms`, clamped to the clip
    /// bounds. An inverted or out-of-range window yields an empty clip.
    pub fn slice_ms(&self, start_ms: u64, end_ms: u64) -> AudioClip {
        let start = self.ms_to_offset(start_ms);
        let end = self.ms_to_offset(end_ms).max(start);

        AudioClip {
            samples: self.samples[start..end].to_vec(),
            sample_rate: self.sample_rate,
            channels: self.channels,
        }
    }

    /// RMS level of the window `start_ms..end_ms` in dBFS, measured across
    /// all channels. Returns `None` for digital silence (zero RMS), which
    /// has no finite decibel value.
    pub fn dbfs_ms(&self, start_ms: u64, end_ms: u64) -> Option<f32> {
        let start = self.ms_to_offset(start_ms);
        let end = self.ms_to_offset(end_ms).max(start);
        dbfs(&self.samples[start..end])
    }
}

/// RMS level of a block of samples in dBFS. `None` when the block is empty
/// or all-zero.
pub fn dbfs(samples: &[f32]) -> Option<f32> {
    if samples.is_empty() {
        return None;
    }

    let sum_squared: f32 = samples.iter().map(|&s| s * s).sum();
    let rms = (sum_squared / samples.len() as f32).sqrt();

    if rms == 0.0 {
        None
    } else {
        Some(20.0 * rms.log10())
    }
}
