//! Options controlling how cells are cropped, resampled and encoded.

use crate::error::SplitError;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Target aspect ratio of every extracted frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9, rendered at 1920×1080.
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// 9:16, rendered at 1080×1920.
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Fixed output size `(width, height)` in pixels.
    pub fn output_size(self) -> (u32, u32) {
        match self {
            AspectRatio::Landscape => (1920, 1080),
            AspectRatio::Portrait => (1080, 1920),
        }
    }

    /// Width divided by height.
    pub fn ratio(self) -> f64 {
        let (w, h) = self.output_size();
        w as f64 / h as f64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" | "landscape" => Ok(AspectRatio::Landscape),
            "9:16" | "portrait" => Ok(AspectRatio::Portrait),
            other => Err(format!("unsupported aspect ratio '{other}' (expected 16:9 or 9:16)")),
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of the output frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg { quality: u8 },
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg { .. } => "jpg",
        }
    }

    /// JPEG quality must lie in `1..=100`.
    pub fn validate(self) -> Result<(), SplitError> {
        match self {
            OutputFormat::Jpeg { quality } if !(1..=100).contains(&quality) => Err(
                SplitError::Format(format!("JPEG quality {quality} is outside 1..=100")),
            ),
            _ => Ok(()),
        }
    }
}

/// Resampling kernel used when scaling a crop to the output size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    #[default]
    Triangle,
    CatmullRom,
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(f: ResampleFilter) -> Self {
        match f {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Layout of the composite: cell counts and gutter thickness per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub gutter_x: usize,
    pub gutter_y: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            gutter_x: 0,
            gutter_y: 0,
        }
    }
}

impl GridConfig {
    /// 3×3 grid with the same gutter on both axes.
    pub fn uniform(gutter: usize) -> Self {
        Self {
            gutter_x: gutter,
            gutter_y: gutter,
            ..Self::default()
        }
    }

    /// Reject layouts whose gutters leave no room for cells.
    pub fn validate(&self, width: usize, height: usize) -> Result<(), SplitError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SplitError::Geometry(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.cols
            )));
        }
        let total_x = self.gutter_x.checked_mul(self.cols - 1);
        if total_x.map_or(true, |t| t >= width) {
            return Err(SplitError::Geometry(format!(
                "vertical gutters ({} x {}px) leave no cell width in a {}px wide image",
                self.cols - 1,
                self.gutter_x,
                width
            )));
        }
        let total_y = self.gutter_y.checked_mul(self.rows - 1);
        if total_y.map_or(true, |t| t >= height) {
            return Err(SplitError::Geometry(format!(
                "horizontal gutters ({} x {}px) leave no cell height in a {}px tall image",
                self.rows - 1,
                self.gutter_y,
                height
            )));
        }
        Ok(())
    }
}

/// Everything the frame extractor needs besides the pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub grid: GridConfig,
    /// Pixels removed from every side of the centred crop.
    pub trim: usize,
    pub aspect_ratio: AspectRatio,
    pub filter: ResampleFilter,
    pub format: OutputFormat,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            trim: 2,
            aspect_ratio: AspectRatio::Landscape,
            filter: ResampleFilter::Triangle,
            format: OutputFormat::Png,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_parses_and_serializes() {
        assert_eq!("9:16".parse::<AspectRatio>(), Ok(AspectRatio::Portrait));
        assert_eq!("landscape".parse::<AspectRatio>(), Ok(AspectRatio::Landscape));
        assert!("4:3".parse::<AspectRatio>().is_err());
        assert_eq!(
            serde_json::to_string(&AspectRatio::Portrait).unwrap(),
            "\"9:16\""
        );
        assert_eq!(AspectRatio::Portrait.output_size(), (1080, 1920));
    }

    #[test]
    fn output_format_is_tagged() {
        let fmt: OutputFormat = serde_json::from_str(r#"{ "type": "jpeg", "quality": 85 }"#).unwrap();
        assert_eq!(fmt, OutputFormat::Jpeg { quality: 85 });
        assert_eq!(fmt.extension(), "jpg");
        let fmt: OutputFormat = serde_json::from_str(r#"{ "type": "png" }"#).unwrap();
        assert_eq!(fmt, OutputFormat::Png);
    }

    #[test]
    fn jpeg_quality_range_is_enforced() {
        assert!(OutputFormat::Png.validate().is_ok());
        assert!(OutputFormat::Jpeg { quality: 1 }.validate().is_ok());
        assert!(OutputFormat::Jpeg { quality: 100 }.validate().is_ok());
        assert!(matches!(
            OutputFormat::Jpeg { quality: 0 }.validate(),
            Err(SplitError::Format(_))
        ));
        assert!(OutputFormat::Jpeg { quality: 101 }.validate().is_err());
    }

    #[test]
    fn gutters_must_leave_cells() {
        let grid = GridConfig::uniform(50);
        assert!(grid.validate(101, 500).is_ok());
        assert!(matches!(
            grid.validate(100, 500),
            Err(SplitError::Geometry(_))
        ));
        assert!(grid.validate(500, 100).is_err());
    }

    #[test]
    fn huge_gutters_are_rejected_without_overflow() {
        let grid = GridConfig::uniform(usize::MAX / 2 + 1);
        assert!(matches!(
            grid.validate(120, 90),
            Err(SplitError::Geometry(_))
        ));
        let tall = GridConfig {
            gutter_y: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            tall.validate(120, 90),
            Err(SplitError::Geometry(_))
        ));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let grid = GridConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(grid.validate(100, 100).is_err());
    }

    #[test]
    fn defaults_match_contact_sheet_layout() {
        let opts = ExtractOptions::default();
        assert_eq!((opts.grid.rows, opts.grid.cols), (3, 3));
        assert_eq!(opts.trim, 2);
        assert_eq!(opts.aspect_ratio, AspectRatio::Landscape);
        assert_eq!(opts.format, OutputFormat::Png);
    }
}
