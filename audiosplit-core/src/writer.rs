//! Segment export to disk.
//!
//! Writes each segment as `segment_<i>.<ext>` inside the destination
//! directory, zero-based, in sequence order. Export is fail-fast: the first
//! failed segment aborts the run and files already written are left in
//! place.

use crate::core::AudioClip;
use crate::encoder::{self, ExportFormat};
use crate::error::SplitResult;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Export segments into `dir`, creating it (and any missing parents) first.
/// Returns the written paths in segment order.
pub fn export_segments(
    segments: &[AudioClip],
    dir: &Path,
    format: ExportFormat,
) -> SplitResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut files = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        let path = dir.join(format!("segment_{}.{}", i, format.extension()));

        let mut enc =
            encoder::for_format(format, &path, segment.sample_rate(), segment.channels())?;
        enc.encode(segment)?;
        enc.finalize()?;

        debug!(
            "wrote {} ({} ms)",
            path.display(),
            segment.duration().as_millis()
        );
        files.push(path);
    }

    info!("exported {} segment(s) to {}", files.len(), dir.display());

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Channels;

    fn make_segment(ms: usize) -> AudioClip {
        AudioClip::new(vec![0.25; ms], 1000, Channels::Mono).unwrap()
    }

    #[test]
    fn test_export_names_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("segments");
        let segments = vec![make_segment(100), make_segment(200), make_segment(300)];

        let files = export_segments(&segments, &out, ExportFormat::Wav).unwrap();

        assert_eq!(files.len(), 3);
        for (i, file) in files.iter().enumerate() {
            assert_eq!(
                file.file_name().unwrap().to_str().unwrap(),
                format!("segment_{}.wav", i)
            );
            assert!(file.is_file());
        }

        // Lengths follow the input order
        let first = hound::WavReader::open(&files[0]).unwrap().len();
        let last = hound::WavReader::open(&files[2]).unwrap().len();
        assert_eq!(first, 100);
        assert_eq!(last, 300);
    }

    #[test]
    fn test_export_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a").join("b").join("segments");

        let files = export_segments(&[make_segment(50)], &out, ExportFormat::Wav).unwrap();
        assert!(files[0].is_file());
    }

    #[test]
    fn test_export_overwrites_same_indices() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("segments");

        export_segments(&[make_segment(100)], &out, ExportFormat::Wav).unwrap();
        export_segments(&[make_segment(400)], &out, ExportFormat::Wav).unwrap();

        let entries: Vec<_> = fs::read_dir(&out).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let len = hound::WavReader::open(out.join("segment_0.wav")).unwrap().len();
        assert_eq!(len, 400);
    }
}
