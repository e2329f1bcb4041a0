use crate::core::{AudioClip, Channels};
use crate::error::{SplitError, SplitResult};
use log::debug;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio decoder
pub struct SymphoniaDecoder {
    /// Current reader for the audio source
    reader: Box<dyn symphonia::core::formats::FormatReader>,
    /// Track information
    track_id: u32,
    /// Sample rate
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
    /// Current decoder state
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
    /// Reusable interleaved conversion buffer
    sample_buf: Option<SampleBuffer<f32>>,
}

impl SymphoniaDecoder {
    /// Create decoder from file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> SplitResult<Self> {
        let path = path.as_ref();

        // Open the file
        let file = Box::new(File::open(path).map_err(SplitError::Io)?);

        // Create media source stream
        let mss = MediaSourceStream::new(file, Default::default());

        // Probe the file to detect format
        let mut hint = Hint::new();
        if let Some(ext) = path.extension() {
            if let Some(ext_str) = ext.to_str() {
                hint.with_extension(ext_str);
            }
        }

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| SplitError::UnsupportedFormat(e.to_string()))?;

        let reader = probed.format;

        // Find the first audio track
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
            .ok_or_else(|| SplitError::Decode("No audio track found".to_string()))?
            .clone();

        let track_id = track.id;
        let codec_params = &track.codec_params;

        // Extract sample rate
        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| SplitError::Decode("Unknown sample rate".to_string()))?;

        // Extract channel info
        let channels = if let Some(channels) = codec_params.channels {
            Channels::from_count(channels.count() as u32)?
        } else {
            return Err(SplitError::Decode("Unknown channel count".to_string()));
        };

        // Create decoder
        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &Default::default())
            .map_err(|e| SplitError::Decode(e.to_string()))?;

        debug!(
            "opened {} ({} Hz, {})",
            path.display(),
            sample_rate,
            channels.name()
        );

        Ok(SymphoniaDecoder {
            reader,
            track_id,
            sample_rate,
            channels,
            decoder,
            sample_buf: None,
        })
    }

    /// Get sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channels
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Decode the whole stream into a single in-memory clip
    pub fn decode_all(mut self) -> SplitResult<AudioClip> {
        let mut samples: Vec<f32> = Vec::new();

        loop {
            // Get next packet
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(symphonia::core::errors::Error::DecodeError(_)) => {
                    // Skip corrupt packets and try the next one
                    continue;
                }
                Err(e) => return Err(SplitError::Decode(e.to_string())),
            };

            // Only process packets from our audio track
            if packet.track_id() != self.track_id {
                continue;
            }

            // Decode the packet
            let audio_buf = match self.decoder.decode(&packet) {
                Ok(audio_buf) => audio_buf,
                Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
                Err(e) => return Err(SplitError::Decode(e.to_string())),
            };

            // Convert Symphonia's planar buffer into interleaved f32
            if self.sample_buf.is_none() {
                let spec = *audio_buf.spec();
                let capacity = audio_buf.capacity() as u64;
                self.sample_buf = Some(SampleBuffer::<f32>::new(capacity, spec));
            }

            if let Some(buf) = self.sample_buf.as_mut() {
                buf.copy_interleaved_ref(audio_buf);
                samples.extend_from_slice(buf.samples());
            }
        }

        if samples.is_empty() {
            return Err(SplitError::Decode(
                "No audio data could be decoded from the file".to_string(),
            ));
        }

        debug!("decoded {} interleaved samples", samples.len());

        AudioClip::new(samples, self.sample_rate, self.channels)
    }
}
