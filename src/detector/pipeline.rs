//! Detector pipeline turning a pixel buffer into a [`GridDetectionResult`].
//!
//! Typical usage:
//! ```no_run
//! use grid_splitter::image::io::load_image;
//! use grid_splitter::SeparatorDetector;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), grid_splitter::SplitError> {
//! let buf = load_image(Path::new("sheet.png"))?;
//! let result = SeparatorDetector::default().detect(&buf.as_view())?;
//! if result.detected {
//!     println!("gutter: {}x{} ({})", result.gutter_x, result.gutter_y, result.confidence);
//! }
//! # Ok(())
//! # }
//! ```
use super::params::DetectorParams;
use super::profile::Axis;
use super::separator::{find_separator, plan_bands, SearchBand};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{DetectionReport, InputDescriptor, SeparatorSearch, TimingBreakdown};
use crate::error::SplitError;
use crate::image::ImageRgb8;
use crate::types::{Confidence, GridDetectionResult, SeparatorPositions};
use log::debug;
use std::time::Instant;

/// Finds near-black gutters at the expected grid boundaries.
#[derive(Clone, Debug, Default)]
pub struct SeparatorDetector {
    params: DetectorParams,
}

impl SeparatorDetector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    /// Run detection and return the compact result.
    pub fn detect(&self, img: &ImageRgb8) -> Result<GridDetectionResult, SplitError> {
        Ok(self.detect_with_diagnostics(img)?.result)
    }

    /// Run detection and keep the per-band trace.
    pub fn detect_with_diagnostics(&self, img: &ImageRgb8) -> Result<DetectionReport, SplitError> {
        img.validate()?;
        self.params.validate()?;
        let total_start = Instant::now();
        debug!(
            "SeparatorDetector::detect start w={} h={} grid={}x{}",
            img.w, img.h, self.params.rows, self.params.cols
        );

        let mut bands = plan_bands(Axis::Vertical, img.w, self.params.cols, &self.params);
        bands.extend(plan_bands(
            Axis::Horizontal,
            img.h,
            self.params.rows,
            &self.params,
        ));

        let mut timings = TimingBreakdown::default();
        let searches = timings.time("separator_search", || self.scan_bands(img, &bands));
        let result = assemble_result(&searches, &self.params);
        timings.total_ms = elapsed_ms(total_start);

        debug!(
            "SeparatorDetector::detect done confidence={} gutter=({}, {}) v={:?} h={:?} elapsed_ms={:.3}",
            result.confidence,
            result.gutter_x,
            result.gutter_y,
            result.separator_positions.vertical,
            result.separator_positions.horizontal,
            timings.total_ms
        );

        Ok(DetectionReport {
            input: InputDescriptor {
                width: img.w,
                height: img.h,
                channels: img.channels,
            },
            result,
            searches,
            timings,
        })
    }

    #[cfg(feature = "parallel")]
    fn scan_bands(&self, img: &ImageRgb8, bands: &[SearchBand]) -> Vec<SeparatorSearch> {
        use rayon::prelude::*;

        bands
            .par_iter()
            .map(|band| find_separator(img, band, &self.params))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn scan_bands(&self, img: &ImageRgb8, bands: &[SearchBand]) -> Vec<SeparatorSearch> {
        bands
            .iter()
            .map(|band| find_separator(img, band, &self.params))
            .collect()
    }
}

/// Fold band traces into the public result.
///
/// Gutters take the thinnest line per axis; confidence needs every expected
/// line for `High` and at least one per axis for `Medium`.
fn assemble_result(searches: &[SeparatorSearch], params: &DetectorParams) -> GridDetectionResult {
    let collect = |axis: Axis| {
        let mut lines: Vec<_> = searches
            .iter()
            .filter(|s| s.axis == axis)
            .filter_map(|s| s.line)
            .collect();
        lines.sort_by_key(|l| l.position);
        lines
    };
    let vertical = collect(Axis::Vertical);
    let horizontal = collect(Axis::Horizontal);

    let gutter_x = vertical.iter().map(|l| l.width).min().unwrap_or(0);
    let gutter_y = horizontal.iter().map(|l| l.width).min().unwrap_or(0);

    let expected_v = params.cols - 1;
    let expected_h = params.rows - 1;
    let confidence = if vertical.len() == expected_v && horizontal.len() == expected_h {
        Confidence::High
    } else if !vertical.is_empty() && !horizontal.is_empty() {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    GridDetectionResult {
        detected: confidence != Confidence::Low,
        confidence,
        gutter_x,
        gutter_y,
        separator_positions: SeparatorPositions {
            vertical: vertical.iter().map(|l| l.position).collect(),
            horizontal: horizontal.iter().map(|l| l.position).collect(),
        },
    }
}
