//! Brightness sampling along full-length strips.
//!
//! A strip is one whole column (vertical axis) or one whole row (horizontal
//! axis). Sums are accumulated as integers and divided once, so strips made
//! of identical pixels report their exact brightness.

use crate::image::{ImageRgb8, ImageView};
use serde::Serialize;

use super::params::MAX_BRIGHTNESS;

/// Orientation of a separator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Column gutter; positions are x offsets.
    Vertical,
    /// Row gutter; positions are y offsets.
    Horizontal,
}

impl Axis {
    /// Number of strips along this axis.
    pub fn extent(self, img: &ImageRgb8) -> usize {
        match self {
            Axis::Vertical => img.w,
            Axis::Horizontal => img.h,
        }
    }

    /// Pixels contained in a single strip.
    pub fn strip_len(self, img: &ImageRgb8) -> usize {
        match self {
            Axis::Vertical => img.h,
            Axis::Horizontal => img.w,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Vertical => "V",
            Axis::Horizontal => "H",
        }
    }
}

/// Sum of R+G+B over every pixel of strip `pos`.
pub fn strip_rgb_sum(img: &ImageRgb8, axis: Axis, pos: usize) -> u64 {
    match axis {
        Axis::Vertical => {
            let i = pos * img.channels;
            img.rows()
                .map(|row| row[i] as u64 + row[i + 1] as u64 + row[i + 2] as u64)
                .sum()
        }
        Axis::Horizontal => img
            .row(pos)
            .chunks_exact(img.channels)
            .map(|px| px[0] as u64 + px[1] as u64 + px[2] as u64)
            .sum(),
    }
}

/// Mean brightness of strip `pos`; empty strips read as white.
pub fn strip_brightness(img: &ImageRgb8, axis: Axis, pos: usize) -> f32 {
    span_brightness(img, axis, pos, 1)
}

/// Mean brightness over `count` consecutive strips starting at `start`.
///
/// Strips past the end of the axis are ignored.
pub fn span_brightness(img: &ImageRgb8, axis: Axis, start: usize, count: usize) -> f32 {
    let end = (start + count).min(axis.extent(img));
    let strips = end.saturating_sub(start);
    let pixels = strips * axis.strip_len(img);
    if pixels == 0 {
        return MAX_BRIGHTNESS;
    }
    let total: u64 = (start..end).map(|p| strip_rgb_sum(img, axis, p)).sum();
    (total as f64 / (3.0 * pixels as f64)) as f32
}
