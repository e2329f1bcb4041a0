use crate::core::{AudioClip, Channels};
use crate::error::{SplitError, SplitResult};
use crate::extract::stderr_tail;
use log::debug;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// MP3 encoder backed by an `ffmpeg` child process.
///
/// Raw `f32le` PCM is streamed over the child's stdin and ffmpeg handles the
/// actual MP3 encoding at best VBR quality, matching the settings used for
/// extraction. The exit code is checked on finalize.
pub struct Mp3Encoder {
    child: Option<Child>,
    stdin: Option<ChildStdin>,
    sample_rate: u32,
    channels: Channels,
    path: PathBuf,
}

/// Build the ffmpeg argument list for encoding piped PCM to MP3
pub fn encode_args(path: &Path, sample_rate: u32, channels: Channels) -> Vec<String> {
    vec![
        "-y".to_string(),
        "-f".to_string(),
        "f32le".to_string(),
        "-ar".to_string(),
        sample_rate.to_string(),
        "-ac".to_string(),
        channels.count().to_string(),
        "-i".to_string(),
        "pipe:0".to_string(),
        "-codec:a".to_string(),
        "libmp3lame".to_string(),
        "-q:a".to_string(),
        "0".to_string(),
        path.to_string_lossy().to_string(),
    ]
}

impl Mp3Encoder {
    /// Spawn the encoding process writing to `path`
    pub fn new<P: AsRef<Path>>(
        path: P,
        sample_rate: u32,
        channels: Channels,
    ) -> SplitResult<Self> {
        which::which("ffmpeg").map_err(|_| SplitError::FfmpegNotFound)?;

        let path = path.as_ref().to_path_buf();
        let args = encode_args(&path, sample_rate, channels);
        debug!("running ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SplitError::Encode("ffmpeg stdin not captured".to_string()))?;

        Ok(Mp3Encoder {
            child: Some(child),
            stdin: Some(stdin),
            sample_rate,
            channels,
            path,
        })
    }

    /// Output path of this encoder
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl super::Encoder for Mp3Encoder {
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

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| SplitError::Encode("Encoder already finalized".to_string()))?;

        let mut bytes = Vec::with_capacity(clip.samples().len() * 4);
        for &sample in clip.samples() {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }

        stdin.write_all(&bytes)?;

        Ok(())
    }

    fn finalize(&mut self) -> SplitResult<()> {
        // Closing stdin lets ffmpeg flush and exit
        drop(self.stdin.take());

        let Some(child) = self.child.take() else {
            return Ok(());
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(SplitError::Encode(format!(
                "ffmpeg exited with {:?}: {}",
                output.status.code(),
                stderr_tail(&output.stderr)
            )));
        }

        Ok(())
    }
}
