use crate::detector::Axis;
use crate::diagnostics::TimingBreakdown;
use crate::types::{GridDetectionResult, SeparatorLine};
use serde::Serialize;

/// Result produced by
/// [`SeparatorDetector::detect_with_diagnostics`](crate::SeparatorDetector).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub input: InputDescriptor,
    pub result: GridDetectionResult,
    pub searches: Vec<SeparatorSearch>,
    pub timings: TimingBreakdown,
}

impl DetectionReport {
    pub fn lines(&self, axis: Axis) -> impl Iterator<Item = &SeparatorLine> + '_ {
        self.searches
            .iter()
            .filter(move |s| s.axis == axis)
            .filter_map(|s| s.line.as_ref())
    }

    /// Number of bands scanned on `axis`.
    pub fn expected(&self, axis: Axis) -> usize {
        self.searches.iter().filter(|s| s.axis == axis).count()
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

/// Trace of one band scan.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeparatorSearch {
    pub axis: Axis,
    pub index: usize,
    pub expected: usize,
    pub search_start: usize,
    pub search_end: usize,
    pub darkest_position: Option<usize>,
    pub darkest_brightness: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_threshold: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<SeparatorLine>,
}
