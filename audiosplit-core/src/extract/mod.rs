//! Video-to-audio extraction via an external `ffmpeg` process.
//!
//! Inputs whose extension marks them as a video container are demuxed to a
//! standalone audio file before the decode stage; everything else passes
//! through untouched.

use crate::error::{SplitError, SplitResult};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Extensions treated as video containers. Matching is case-sensitive.
pub const VIDEO_EXTENSIONS: [&str; 3] = ["mp4", "mkv", "avi"];

/// Name of the extracted audio file, created in the current working
/// directory and left behind after the run.
pub const TEMP_AUDIO_FILE: &str = "temp_audio.mp3";

/// Whether the path's extension marks it as a video container
pub fn is_video_container(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => VIDEO_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Build the ffmpeg argument list for extracting the best-quality audio
/// stream out of a container
pub fn extraction_args(input: &Path, output: &Path) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-q:a".to_string(),
        "0".to_string(),
        "-map".to_string(),
        "a".to_string(),
        output.to_string_lossy().to_string(),
    ]
}

/// Demux the first audio stream of `input` into `output`.
///
/// The process exit code is checked; a non-zero status is reported together
/// with the tail of the captured stderr.
pub fn extract_audio(input: &Path, output: &Path) -> SplitResult<()> {
    which::which("ffmpeg").map_err(|_| SplitError::FfmpegNotFound)?;

    let args = extraction_args(input, output);
    debug!("running ffmpeg {}", args.join(" "));

    let result = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .output()?;

    if !result.status.success() {
        return Err(SplitError::ExtractionFailed {
            exit_code: result.status.code(),
            stderr: stderr_tail(&result.stderr),
        });
    }

    info!(
        "extracted audio from {} into {}",
        input.display(),
        output.display()
    );

    Ok(())
}

/// Resolve the active input for the rest of the pipeline: video containers
/// are extracted to [`TEMP_AUDIO_FILE`], audio files pass through unchanged.
pub fn normalize_input(input: &Path) -> SplitResult<PathBuf> {
    if !is_video_container(input) {
        return Ok(input.to_path_buf());
    }

    let output = PathBuf::from(TEMP_AUDIO_FILE);
    extract_audio(input, &output)?;
    Ok(output)
}

/// Last portion of a stderr capture, enough to show the actual failure
pub(crate) fn stderr_tail(stderr: &[u8]) -> String {
    const TAIL_LEN: usize = 800;
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.len() <= TAIL_LEN {
        text.to_string()
    } else {
        let cut = text.len() - TAIL_LEN;
        // Avoid slicing inside a multi-byte character
        let start = (cut..text.len())
            .find(|&i| text.is_char_boundary(i))
            .unwrap_or(cut);
        text[start..].to_string()
    }
}
