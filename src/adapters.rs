//! Entry points over encoded images (bytes or files).
//!
//! Each adapter decodes once with the `image` crate and hands the pixel view
//! to the core. A decode failure is returned as [`SplitError::Decode`], never
//! as an undetected grid.

use crate::detector::SeparatorDetector;
use crate::error::SplitError;
use crate::extractor::{AspectRatio, ExtractOptions, FrameExtractor};
use crate::image::io::{decode_image, load_image};
use crate::orchestrator::{AutoExtractParams, AutoExtractor};
use crate::types::{AutoExtractResult, ExtractedFrame, GridDetectionResult};
use std::path::Path;

/// Detect the 3×3 gutters of an encoded composite.
pub fn detect_grid_separators(bytes: &[u8]) -> Result<GridDetectionResult, SplitError> {
    let buf = decode_image(bytes)?;
    SeparatorDetector::default().detect(&buf.as_view())
}

/// Split an encoded composite with an explicit grid description.
pub fn extract_grid_frames(
    bytes: &[u8],
    options: &ExtractOptions,
) -> Result<Vec<ExtractedFrame>, SplitError> {
    let buf = decode_image(bytes)?;
    FrameExtractor::new(options.clone()).extract(&buf.as_view())
}

/// Detect the grid and split the composite with the detected gutter.
pub fn auto_extract_frames(
    bytes: &[u8],
    aspect_ratio: AspectRatio,
) -> Result<AutoExtractResult, SplitError> {
    let buf = decode_image(bytes)?;
    AutoExtractor::new(AutoExtractParams::with_aspect_ratio(aspect_ratio)).run(&buf.as_view())
}

/// [`auto_extract_frames`] for an image file on disk.
pub fn auto_extract_path(
    path: &Path,
    aspect_ratio: AspectRatio,
) -> Result<AutoExtractResult, SplitError> {
    let buf = load_image(path)?;
    AutoExtractor::new(AutoExtractParams::with_aspect_ratio(aspect_ratio)).run(&buf.as_view())
}
