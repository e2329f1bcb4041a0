//! Silence detection over a decoded clip.
//!
//! The clip is measured in fixed-size frames. A frame is silent when its RMS
//! level is at or below the configured threshold; a maximal run of silent
//! frames spanning at least the minimum silence length is a split boundary.
//! Segments are the non-silent complement, each padded with a short stretch
//! of the surrounding silence so cuts do not land hard on a waveform edge.

use crate::core::AudioClip;
use crate::error::{SplitError, SplitResult};
use log::debug;

/// Parameters controlling silence detection
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Minimum length of a silence run that counts as a boundary, in ms
    pub min_silence_ms: u64,
    /// Loudness at or below which a frame is silent, in dBFS
    pub silence_thresh_db: f32,
    /// Measurement frame size in ms
    pub frame_ms: u64,
    /// Silence retained on each edge of an emitted segment, in ms
    pub keep_silence_ms: u64,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            min_silence_ms: 3000,
            silence_thresh_db: -40.0,
            frame_ms: 10,
            keep_silence_ms: 100,
        }
    }
}

impl SplitterConfig {
    /// Config with the given minimum silence length and threshold, default
    /// frame size and padding
    pub fn new(min_silence_ms: u64, silence_thresh_db: f32) -> Self {
        Self {
            min_silence_ms,
            silence_thresh_db,
            ..Self::default()
        }
    }
}

/// A half-open span of clip time in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Start time in milliseconds
    pub start_ms: u64,
    /// End time in milliseconds
    pub end_ms: u64,
}

impl TimeRange {
    /// Duration of this range in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Find every silence run in the clip that is long enough to act as a split
/// boundary, in source order.
pub fn detect_silence(clip: &AudioClip, config: &SplitterConfig) -> SplitResult<Vec<TimeRange>> {
    if config.frame_ms == 0 || config.min_silence_ms == 0 {
        return Err(SplitError::InvalidParams(
            "frame size and minimum silence length must be positive".to_string(),
        ));
    }

    let len_ms = clip.len_ms();
    let mut runs = Vec::new();
    let mut run_start: Option<u64> = None;

    let mut pos = 0u64;
    while pos < len_ms {
        let frame_end = (pos + config.frame_ms).min(len_ms);
        // Digital silence has no measurable level and always counts
        let silent = clip
            .dbfs_ms(pos, frame_end)
            .map_or(true, |db| db <= config.silence_thresh_db);

        match (run_start, silent) {
            (None, true) => run_start = Some(pos),
            (Some(start), false) => {
                if pos - start >= config.min_silence_ms {
                    runs.push(TimeRange {
                        start_ms: start,
                        end_ms: pos,
                    });
                }
                run_start = None;
            }
            _ => {}
        }

        pos = frame_end;
    }

    // A run still open at the end of the clip
    if let Some(start) = run_start {
        if len_ms - start >= config.min_silence_ms {
            runs.push(TimeRange {
                start_ms: start,
                end_ms: len_ms,
            });
        }
    }

    Ok(runs)
}

/// Find the non-silent spans of the clip, in source order. An all-silent
/// clip yields no spans; a clip with no qualifying silence yields one span
/// covering the whole clip.
pub fn detect_nonsilent(clip: &AudioClip, config: &SplitterConfig) -> SplitResult<Vec<TimeRange>> {
    let len_ms = clip.len_ms();
    if len_ms == 0 {
        return Ok(Vec::new());
    }

    let silences = detect_silence(clip, config)?;

    let mut spans = Vec::new();
    let mut cursor = 0u64;
    for silence in &silences {
        if silence.start_ms > cursor {
            spans.push(TimeRange {
                start_ms: cursor,
                end_ms: silence.start_ms,
            });
        }
        cursor = silence.end_ms;
    }
    if cursor < len_ms {
        spans.push(TimeRange {
            start_ms: cursor,
            end_ms: len_ms,
        });
    }

    Ok(spans)
}

/// Split the clip wherever a qualifying silence run is found, returning the
/// non-silent segments in source order with `keep_silence_ms` of padding on
/// each edge (clamped to the clip bounds).
pub fn split_on_silence(clip: &AudioClip, config: &SplitterConfig) -> SplitResult<Vec<AudioClip>> {
    let len_ms = clip.len_ms();
    let spans = detect_nonsilent(clip, config)?;

    debug!(
        "split found {} non-silent span(s) in {} ms of audio",
        spans.len(),
        len_ms
    );

    let segments = spans
        .iter()
        .map(|span| {
            let start = span.start_ms.saturating_sub(config.keep_silence_ms);
            let end = (span.end_ms + config.keep_silence_ms).min(len_ms);
            clip.slice_ms(start, end)
        })
        .collect();

    Ok(segments)
}
