use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for split pipeline operations
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors surfaced by the split pipeline
#[derive(Error, Debug)]
pub enum SplitError {
    /// IO error (file operations, disk access)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Selected input file does not exist
    #[error("File not found: {0}")]
    InputNotFound(PathBuf),

    /// Duration or silence threshold failed to parse
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// FFmpeg binary is not on PATH
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    /// Audio extraction subprocess failed
    #[error("Audio extraction failed (exit code {exit_code:?}): {stderr}")]
    ExtractionFailed {
        /// Exit code of the ffmpeg process, if it ran to completion
        exit_code: Option<i32>,
        /// Tail of the captured stderr output
        stderr: String,
    },

    /// Unsupported container or codec
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Decoding failed
    #[error("Failed to load audio file: {0}")]
    Decode(String),

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u32,
        /// Got number of channels
        got: u32,
    },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate
        rate: u32,
    },

    /// Segment export failed
    #[error("Failed to export segment: {0}")]
    Encode(String),

    /// Splitting produced zero segments
    #[error("No segments were created. Adjust the parameters and try again.")]
    NoSegments,
}

impl SplitError {
    /// Whether this error is a problem with the user's input rather than a
    /// processing failure. Input problems surface as warnings, the rest as
    /// critical errors.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SplitError::InputNotFound(_) | SplitError::InvalidParams(_)
        )
    }
}

impl From<hound::Error> for SplitError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => SplitError::Io(e),
            e => SplitError::Encode(e.to_string()),
        }
    }
}
