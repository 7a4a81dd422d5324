#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod adapters;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod extractor;
pub mod image;
pub mod orchestrator;
pub mod types;

// Tooling support for the demo binaries.
pub mod config;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector, extractor, orchestrator + results.
pub use crate::detector::{DetectorParams, SeparatorDetector};
pub use crate::error::SplitError;
pub use crate::extractor::{AspectRatio, ExtractOptions, FrameExtractor, GridConfig, OutputFormat};
pub use crate::orchestrator::{AutoExtractParams, AutoExtractor};
pub use crate::types::{
    AutoExtractResult, Confidence, ExtractedFrame, GridDetectionResult, SeparatorLine,
    SeparatorPositions,
};

// Byte/file adapters.
pub use crate::adapters::{
    auto_extract_frames, auto_extract_path, detect_grid_separators, extract_grid_frames,
};

// High-level diagnostics returned by the `*_with_diagnostics` entry points.
pub use crate::diagnostics::{AutoExtractReport, DetectionReport, ExtractionReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use grid_splitter::prelude::*;
///
/// # fn main() {
/// let (w, h) = (1920usize, 1080usize);
/// let rgb = vec![0u8; w * h * 3];
/// let img = ImageRgb8::packed(w, h, 3, &rgb);
///
/// let auto = AutoExtractor::new(AutoExtractParams::default());
/// match auto.run(&img) {
///     Ok(res) => println!("success={} frames={}", res.success, res.frames.len()),
///     Err(err) => eprintln!("{err}"),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgb8;
    pub use crate::{
        AspectRatio, AutoExtractParams, AutoExtractResult, AutoExtractor, Confidence,
        GridDetectionResult, SeparatorDetector, SplitError,
    };
}
