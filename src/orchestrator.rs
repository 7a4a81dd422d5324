//! Auto-extraction: detect the gutters, then split with the detected gutter.
//!
//! The run is a small state machine `Detecting → Extracting → Done`. A
//! composite whose grid is not found goes straight from `Detecting` to `Done`
//! with an unsuccessful result; extraction is never attempted on a guess.

use crate::detector::{DetectorParams, SeparatorDetector};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{AutoExtractReport, DetectionReport, ExtractionReport, TimingBreakdown};
use crate::error::SplitError;
use crate::extractor::{
    AspectRatio, ExtractOptions, FrameExtractor, GridConfig, OutputFormat, ResampleFilter,
};
use crate::image::ImageRgb8;
use crate::types::{AutoExtractResult, Confidence, GridDetectionResult};
use log::{info, warn};
use serde::Deserialize;
use std::time::Instant;

/// Parameters of an auto-extraction run.
///
/// The defaults reproduce the contact-sheet behaviour: 3×3 detection, 2px
/// trim, 16:9 PNG output.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AutoExtractParams {
    pub detector: DetectorParams,
    pub aspect_ratio: AspectRatio,
    pub trim: usize,
    pub filter: ResampleFilter,
    pub format: OutputFormat,
}

impl Default for AutoExtractParams {
    fn default() -> Self {
        Self {
            detector: DetectorParams::default(),
            aspect_ratio: AspectRatio::Landscape,
            trim: 2,
            filter: ResampleFilter::Triangle,
            format: OutputFormat::Png,
        }
    }
}

impl AutoExtractParams {
    pub fn with_aspect_ratio(aspect_ratio: AspectRatio) -> Self {
        Self {
            aspect_ratio,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AutoExtractState {
    Detecting,
    Extracting {
        gutter: usize,
        confidence: Confidence,
    },
    Done(AutoExtractResult),
}

impl AutoExtractState {
    /// State following a finished detection pass.
    pub fn after_detection(detection: &GridDetectionResult) -> Self {
        if detection.detected {
            AutoExtractState::Extracting {
                gutter: detection.unified_gutter(),
                confidence: detection.confidence,
            }
        } else {
            AutoExtractState::Done(AutoExtractResult::not_detected())
        }
    }
}

#[derive(Default)]
struct RunTrace {
    detection: Option<DetectionReport>,
    extraction: Option<ExtractionReport>,
    timings: TimingBreakdown,
}

/// Runs detection and extraction back to back on one decoded composite.
#[derive(Clone, Debug, Default)]
pub struct AutoExtractor {
    params: AutoExtractParams,
}

impl AutoExtractor {
    pub fn new(params: AutoExtractParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AutoExtractParams {
        &self.params
    }

    pub fn run(&self, img: &ImageRgb8) -> Result<AutoExtractResult, SplitError> {
        Ok(self.run_with_diagnostics(img)?.0)
    }

    pub fn run_with_diagnostics(
        &self,
        img: &ImageRgb8,
    ) -> Result<(AutoExtractResult, AutoExtractReport), SplitError> {
        self.params.format.validate()?;
        let total_start = Instant::now();
        let mut trace = RunTrace::default();
        let mut state = AutoExtractState::Detecting;

        let result = loop {
            state = match state {
                AutoExtractState::Done(result) => break result,
                other => self.step(other, img, &mut trace)?,
            };
        };
        trace.timings.total_ms = elapsed_ms(total_start);

        if result.success {
            info!(
                "auto-extract: {} frames, confidence={}, gutter={}px",
                result.frames.len(),
                result.confidence,
                result.detected_gutter
            );
        } else {
            warn!("auto-extract: no 3x3 grid detected, manual grid setup recommended");
        }

        let report = AutoExtractReport {
            detection: trace.detection,
            success: result.success,
            confidence: result.confidence,
            detected_gutter: result.detected_gutter,
            frame_count: result.frames.len(),
            extraction: trace.extraction,
            timings: trace.timings,
        };
        Ok((result, report))
    }

    /// Options handed to the extractor once a gutter has been measured.
    pub fn extract_options(&self, gutter: usize) -> ExtractOptions {
        ExtractOptions {
            grid: GridConfig {
                rows: self.params.detector.rows,
                cols: self.params.detector.cols,
                gutter_x: gutter,
                gutter_y: gutter,
            },
            trim: self.params.trim,
            aspect_ratio: self.params.aspect_ratio,
            filter: self.params.filter,
            format: self.params.format,
        }
    }

    fn step(
        &self,
        state: AutoExtractState,
        img: &ImageRgb8,
        trace: &mut RunTrace,
    ) -> Result<AutoExtractState, SplitError> {
        match state {
            AutoExtractState::Detecting => {
                let detector = SeparatorDetector::new(self.params.detector.clone());
                let report = trace
                    .timings
                    .time("detect", || detector.detect_with_diagnostics(img))?;
                let next = AutoExtractState::after_detection(&report.result);
                trace.detection = Some(report);
                Ok(next)
            }
            AutoExtractState::Extracting { gutter, confidence } => {
                let extractor = FrameExtractor::new(self.extract_options(gutter));
                let (frames, report) = trace
                    .timings
                    .time("extract", || extractor.extract_with_diagnostics(img))?;
                trace.extraction = Some(report);
                Ok(AutoExtractState::Done(AutoExtractResult {
                    success: true,
                    confidence,
                    frames,
                    detected_gutter: gutter,
                }))
            }
            done @ AutoExtractState::Done(_) => Ok(done),
        }
    }
}
