#![warn(missing_docs)]

//! # audiosplit-core: Silence-Based Media Splitting
//!
//! The full pipeline behind the audio splitter application: take a media
//! file, extract the audio track if the file is a video container, decode it
//! into memory, split it wherever a long-enough silence run is found, and
//! write each non-silent segment out as its own audio file.
//!
//! ## Quick Start
//!
//! ```ignore
//! use audiosplit_core::{pipeline, SplitRequest};
//!
//! let request = SplitRequest::parse("talk.mp3", "3", "-40")?;
//! let outcome = pipeline::run(&request)?;
//! println!("wrote {} segments to {}",
//!     outcome.segment_count(),
//!     outcome.output_dir.display());
//! ```

// Declare modules
/// Core audio types and structures
pub mod core;
/// Error types for the split pipeline
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Audio encoder implementations
pub mod encoder;
/// Video-to-audio extraction
pub mod extract;
/// Silence detection and splitting
pub mod splitter;
/// Segment export
pub mod writer;
/// Request orchestration
pub mod pipeline;

// Export public types
pub use self::core::{AudioClip, Channels};
pub use encoder::ExportFormat;
pub use error::{SplitError, SplitResult};
pub use pipeline::{SplitOutcome, SplitRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
