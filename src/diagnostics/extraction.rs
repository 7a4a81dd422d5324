use crate::diagnostics::{DetectionReport, InputDescriptor, TimingBreakdown};
use crate::extractor::{AspectRatio, CropRegion};
use crate::types::Confidence;
use serde::Serialize;

/// Trace of one [`FrameExtractor`](crate::FrameExtractor) run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub input: InputDescriptor,
    pub aspect_ratio: AspectRatio,
    pub output_width: u32,
    pub output_height: u32,
    pub plan: Vec<CropRegion>,
    pub timings: TimingBreakdown,
}

/// Trace of one [`AutoExtractor`](crate::AutoExtractor) run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoExtractReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<DetectionReport>,
    pub success: bool,
    pub confidence: Confidence,
    pub detected_gutter: usize,
    pub frame_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extraction: Option<ExtractionReport>,
    pub timings: TimingBreakdown,
}
