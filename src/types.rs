use serde::{Serialize, Serializer};

/// How much of the expected grid structure was found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected gutter on a single axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeparatorLine {
    /// First column (vertical) or row (horizontal) of the gutter.
    pub position: usize,
    /// Thickness in pixels.
    pub width: usize,
    /// Mean brightness over `[position, position + width)`.
    pub average_brightness: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SeparatorPositions {
    pub vertical: Vec<usize>,
    pub horizontal: Vec<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridDetectionResult {
    pub detected: bool,
    pub confidence: Confidence,
    pub gutter_x: usize,
    pub gutter_y: usize,
    pub separator_positions: SeparatorPositions,
}

impl GridDetectionResult {
    /// Single gutter used for extraction when both axes share a spacing.
    pub fn unified_gutter(&self) -> usize {
        self.gutter_x.max(self.gutter_y)
    }
}

/// One encoded output image and the grid cell it was cut from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFrame {
    #[serde(rename = "imageBytes", serialize_with = "serialize_byte_len")]
    pub image_data: Vec<u8>,
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoExtractResult {
    pub success: bool,
    pub confidence: Confidence,
    pub frames: Vec<ExtractedFrame>,
    pub detected_gutter: usize,
}

impl AutoExtractResult {
    /// Result returned when the composite does not look like a clean grid.
    pub fn not_detected() -> Self {
        Self {
            success: false,
            confidence: Confidence::Low,
            frames: Vec::new(),
            detected_gutter: 0,
        }
    }
}

fn serialize_byte_len<S: Serializer>(data: &[u8], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(data.len() as u64)
}
