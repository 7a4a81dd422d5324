//! Parameter types configuring the separator search.
//!
//! The defaults are calibrated for solid near-black gutters rendered by
//! composite generators at common resolutions (e.g. 1920×1080). They are
//! preserved as-is; tune them only with a corpus of real composites at hand.

use crate::error::SplitError;
use serde::Deserialize;

/// Brightness ceiling on the 0–255 scale.
pub const MAX_BRIGHTNESS: f32 = 255.0;

/// Knobs for [`SeparatorDetector`](super::SeparatorDetector).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Expected number of cell rows (horizontal separators = rows - 1).
    pub rows: usize,
    /// Expected number of cell columns (vertical separators = cols - 1).
    pub cols: usize,
    /// Half-width of each search band as a fraction of the axis length.
    pub search_band_fraction: f32,
    /// Darkest strip must be strictly below this brightness to count.
    pub max_separator_brightness: f32,
    /// Maximum strips the thickness estimate may grow on each side.
    pub max_expand_px: usize,
    /// Upper bound of the local darkness threshold used while expanding.
    pub local_threshold_cap: f32,
    /// Multiplier applied to the darkest brightness to get the local threshold.
    pub local_threshold_factor: f32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 3,
            search_band_fraction: 0.05,
            max_separator_brightness: 25.0,
            max_expand_px: 15,
            local_threshold_cap: 40.0,
            local_threshold_factor: 8.0,
        }
    }
}

impl DetectorParams {
    /// Threshold a neighbouring strip must stay below to extend the line.
    ///
    /// The darkest brightness is clamped to at least 1 so that a pure-black
    /// gutter (brightness 0) still expands across its equally black strips.
    pub fn local_threshold(&self, darkest: f32) -> f32 {
        (darkest.max(1.0) * self.local_threshold_factor).min(self.local_threshold_cap)
    }

    pub fn validate(&self) -> Result<(), SplitError> {
        if self.rows < 2 || self.cols < 2 {
            return Err(SplitError::Geometry(format!(
                "separator detection needs at least 2x2 cells, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(self.search_band_fraction > 0.0 && self.search_band_fraction <= 0.5) {
            return Err(SplitError::Geometry(format!(
                "search band fraction must be in (0, 0.5], got {}",
                self.search_band_fraction
            )));
        }
        if !(self.max_separator_brightness > 0.0
            && self.max_separator_brightness <= MAX_BRIGHTNESS)
        {
            return Err(SplitError::Geometry(format!(
                "separator brightness threshold must be in (0, 255], got {}",
                self.max_separator_brightness
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_threshold_is_capped() {
        let params = DetectorParams::default();
        assert_eq!(params.local_threshold(2.0), 16.0);
        assert_eq!(params.local_threshold(24.0), 40.0);
    }

    #[test]
    fn local_threshold_floors_pure_black() {
        let params = DetectorParams::default();
        assert_eq!(params.local_threshold(0.0), 8.0);
        assert_eq!(params.local_threshold(0.5), 8.0);
    }

    #[test]
    fn single_row_layout_is_invalid() {
        let params = DetectorParams {
            rows: 1,
            ..Default::default()
        };
        assert!(params.validate().is_err());
        assert!(DetectorParams::default().validate().is_ok());
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let params: DetectorParams = serde_json::from_str(r#"{ "max_expand_px": 4 }"#).unwrap();
        assert_eq!(params.max_expand_px, 4);
        assert_eq!(params.rows, 3);
    }
}
