//! The split pipeline: normalize, decode, split, export.
//!
//! One [`SplitRequest`] describes one run. The request is immutable and
//! carries everything the pipeline needs, so callers (the GUI, tests) build
//! it once at submit time and hand it over.

use crate::decoder;
use crate::encoder::ExportFormat;
use crate::error::{SplitError, SplitResult};
use crate::extract;
use crate::splitter::{split_on_silence, SplitterConfig};
use crate::writer;
use log::info;
use std::path::PathBuf;

/// Name of the output directory created next to the input file
pub const SEGMENTS_DIR: &str = "segments";

/// Parameters for one split run
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Path of the media file to split
    pub input_path: PathBuf,
    /// Minimum silence length in seconds that counts as a split boundary
    pub min_silence_secs: u32,
    /// Silence threshold in dBFS
    pub silence_thresh_db: i32,
    /// Output format for exported segments
    pub format: ExportFormat,
}

impl SplitRequest {
    /// Build a request from the raw form fields.
    ///
    /// Both numeric fields parse eagerly and atomically; if either fails the
    /// whole submission is rejected before any filesystem or subprocess
    /// work. The duration must be at least one second.
    pub fn parse(file_path: &str, duration: &str, silence_thresh: &str) -> SplitResult<Self> {
        let min_silence_secs: u32 = duration.trim().parse().map_err(|_| {
            SplitError::InvalidParams("duration must be a whole number of seconds".to_string())
        })?;
        let silence_thresh_db: i32 = silence_thresh.trim().parse().map_err(|_| {
            SplitError::InvalidParams("silence threshold must be a whole number of dB".to_string())
        })?;

        if min_silence_secs == 0 {
            return Err(SplitError::InvalidParams(
                "duration must be at least 1 second".to_string(),
            ));
        }

        Ok(SplitRequest {
            input_path: PathBuf::from(file_path.trim()),
            min_silence_secs,
            silence_thresh_db,
            format: ExportFormat::Mp3,
        })
    }
}

/// Result of a successful split run
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Directory the segments were written to
    pub output_dir: PathBuf,
    /// Written segment files, in order
    pub files: Vec<PathBuf>,
}

impl SplitOutcome {
    /// Number of segments written
    pub fn segment_count(&self) -> usize {
        self.files.len()
    }
}

/// Run the whole pipeline for one request.
///
/// Stages run strictly in order and the first failure aborts the run. No
/// output directory is created unless splitting produced at least one
/// segment.
pub fn run(request: &SplitRequest) -> SplitResult<SplitOutcome> {
    if !request.input_path.is_file() {
        return Err(SplitError::InputNotFound(request.input_path.clone()));
    }

    info!("splitting {}", request.input_path.display());

    // Video containers are demuxed to a temp audio file first
    let active_path = extract::normalize_input(&request.input_path)?;

    let clip = decoder::decode_file(&active_path)?;
    info!(
        "decoded {} ms of audio ({} Hz, {})",
        clip.len_ms(),
        clip.sample_rate(),
        clip.channels().name()
    );

    let config = SplitterConfig::new(
        request.min_silence_secs as u64 * 1000,
        request.silence_thresh_db as f32,
    );

    let segments = split_on_silence(&clip, &config)?;
    if segments.is_empty() {
        return Err(SplitError::NoSegments);
    }

    let output_dir = request
        .input_path
        .parent()
        .map(|p| p.join(SEGMENTS_DIR))
        .unwrap_or_else(|| PathBuf::from(SEGMENTS_DIR));

    let files = writer::export_segments(&segments, &output_dir, request.format)?;

    info!(
        "split complete, {} segment(s) in {}",
        files.len(),
        output_dir.display()
    );

    Ok(SplitOutcome { output_dir, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use std::path::Path;

    // Tone / silence spans written as a mono 8 kHz WAV fixture
    fn write_wav(path: &Path, spans: &[(u64, bool)]) {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(path, spec).unwrap();
        for &(ms, loud) in spans {
            let n = (ms * 8000 / 1000) as usize;
            for i in 0..n {
                let s = if loud {
                    (i as f32 * 0.05).sin() * 0.5
                } else {
                    0.0
                };
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    fn wav_request(path: &Path) -> SplitRequest {
        SplitRequest {
            input_path: path.to_path_buf(),
            min_silence_secs: 3,
            silence_thresh_db: -40,
            format: ExportFormat::Wav,
        }
    }

    #[test]
    fn test_parse_valid_fields() {
        let request = SplitRequest::parse("  /tmp/a.mp3 ", " 3 ", "-40").unwrap();
        assert_eq!(request.input_path, PathBuf::from("/tmp/a.mp3"));
        assert_eq!(request.min_silence_secs, 3);
        assert_eq!(request.silence_thresh_db, -40);
        assert_eq!(request.format, ExportFormat::Mp3);
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert!(SplitRequest::parse("a.mp3", "abc", "-40").is_err());
        assert!(SplitRequest::parse("a.mp3", "3", "quiet").is_err());
        assert!(SplitRequest::parse("a.mp3", "3.5", "-40").is_err());
        assert!(SplitRequest::parse("a.mp3", "", "").is_err());
    }

    #[test]
    fn test_parse_rejects_zero_duration() {
        let err = SplitRequest::parse("a.mp3", "0", "-40").unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_missing_input_aborts_early() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.mp3");

        let err = run(&wav_request(&missing)).unwrap_err();
        assert!(matches!(err, SplitError::InputNotFound(_)));

        // Nothing was created
        assert!(!dir.path().join(SEGMENTS_DIR).exists());
    }

    #[test]
    fn test_full_run_writes_ordered_segments() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("take.wav");
        write_wav(&input, &[(2000, true), (4000, false), (2000, true)]);

        let outcome = run(&wav_request(&input)).unwrap();

        assert_eq!(outcome.output_dir, dir.path().join(SEGMENTS_DIR));
        assert_eq!(outcome.segment_count(), 2);
        assert_eq!(
            outcome.files[0],
            outcome.output_dir.join("segment_0.wav")
        );
        assert_eq!(
            outcome.files[1],
            outcome.output_dir.join("segment_1.wav")
        );
        assert!(outcome.files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn test_unbroken_audio_is_one_segment() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tone.wav");
        write_wav(&input, &[(5000, true)]);

        let outcome = run(&wav_request(&input)).unwrap();
        assert_eq!(outcome.segment_count(), 1);
    }

    #[test]
    fn test_all_silence_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("quiet.wav");
        write_wav(&input, &[(5000, false)]);

        let err = run(&wav_request(&input)).unwrap_err();
        assert!(matches!(err, SplitError::NoSegments));
        assert!(!dir.path().join(SEGMENTS_DIR).exists());
    }

    #[test]
    fn test_rerun_overwrites_instead_of_accumulating() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("take.wav");
        write_wav(&input, &[(2000, true), (4000, false), (2000, true)]);

        let first = run(&wav_request(&input)).unwrap();
        let second = run(&wav_request(&input)).unwrap();

        assert_eq!(first.files, second.files);
        let entries: Vec<_> = std::fs::read_dir(&second.output_dir).unwrap().collect();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_threshold_comes_from_request() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("take.wav");
        // The gap is a quiet hum near -46 dBFS rather than digital silence
        let spec = WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&input, spec).unwrap();
        for i in 0..16000 {
            writer
                .write_sample((i as f32 * 0.05).sin() * 0.5)
                .unwrap();
        }
        for _ in 0..32000 {
            writer.write_sample(0.005f32).unwrap();
        }
        for i in 0..16000 {
            writer
                .write_sample((i as f32 * 0.05).sin() * 0.5)
                .unwrap();
        }
        writer.finalize().unwrap();

        let mut request = wav_request(&input);
        request.silence_thresh_db = -40;
        assert_eq!(run(&request).unwrap().segment_count(), 2);

        // A stricter threshold no longer counts the hum as silence
        request.silence_thresh_db = -50;
        assert_eq!(run(&request).unwrap().segment_count(), 1);
    }
}
