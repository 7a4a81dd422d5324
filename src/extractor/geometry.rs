//! Cell layout and aspect-correct crop planning.
//!
//! Cells are uniform: gutters are subtracted once per internal boundary and the
//! remaining length is split evenly, so cell edges are fractional. The crop is
//! the largest rectangle of the target ratio that fits the cell, centred, then
//! inset by the trim margin. Only the final crop is rounded to whole pixels.

use super::options::ExtractOptions;
use crate::error::SplitError;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRect {
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Whole-pixel source rectangle handed to the resampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Crop planned for one cell, in absolute image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRegion {
    pub cell: CellRect,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub pixels: PixelRect,
}

/// Uniform cell rectangles in row-major order. No validation.
pub fn cell_rects(width: usize, height: usize, opts: &ExtractOptions) -> Vec<CellRect> {
    let grid = &opts.grid;
    let gutters_x = grid.gutter_x as f64 * grid.cols.saturating_sub(1) as f64;
    let gutters_y = grid.gutter_y as f64 * grid.rows.saturating_sub(1) as f64;
    let cell_w = (width as f64 - gutters_x) / grid.cols as f64;
    let cell_h = (height as f64 - gutters_y) / grid.rows as f64;

    let mut cells = Vec::with_capacity(grid.rows * grid.cols);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            cells.push(CellRect {
                row,
                col,
                x: col as f64 * (cell_w + grid.gutter_x as f64),
                y: row as f64 * (cell_h + grid.gutter_y as f64),
                width: cell_w,
                height: cell_h,
            });
        }
    }
    cells
}

/// Centred crop of `target` ratio (width / height) inside `cell`, inset by `trim`.
pub fn crop_in_cell(cell: &CellRect, target: f64, trim: f64) -> (f64, f64, f64, f64) {
    let cell_aspect = cell.width / cell.height;
    let (crop_w, crop_h) = if cell_aspect > target {
        (cell.height * target, cell.height)
    } else {
        (cell.width, cell.width / target)
    };
    let x = cell.x + (cell.width - crop_w) / 2.0 + trim;
    let y = cell.y + (cell.height - crop_h) / 2.0 + trim;
    (x, y, crop_w - 2.0 * trim, crop_h - 2.0 * trim)
}

/// Validate the layout against the image and plan every crop.
///
/// Fails as a whole when any cell would produce an empty crop.
pub fn plan_cells(
    width: usize,
    height: usize,
    opts: &ExtractOptions,
) -> Result<Vec<CropRegion>, SplitError> {
    opts.grid.validate(width, height)?;
    let target = opts.aspect_ratio.ratio();
    let trim = opts.trim as f64;

    cell_rects(width, height, opts)
        .into_iter()
        .map(|cell| {
            let (x, y, w, h) = crop_in_cell(&cell, target, trim);
            if w <= 0.0 || h <= 0.0 {
                return Err(SplitError::Geometry(format!(
                    "trim of {}px leaves no crop in cell ({}, {}) of {:.1}x{:.1}px",
                    opts.trim, cell.row, cell.col, cell.width, cell.height
                )));
            }
            let pixels = to_pixel_rect(x, y, w, h, width, height).ok_or_else(|| {
                SplitError::Geometry(format!(
                    "crop {w:.2}x{h:.2}px in cell ({}, {}) rounds to an empty rectangle",
                    cell.row, cell.col
                ))
            })?;
            Ok(CropRegion {
                cell,
                x,
                y,
                width: w,
                height: h,
                pixels,
            })
        })
        .collect()
}

fn to_pixel_rect(
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    max_w: usize,
    max_h: usize,
) -> Option<PixelRect> {
    let x0 = x.round().clamp(0.0, max_w as f64) as u32;
    let y0 = y.round().clamp(0.0, max_h as f64) as u32;
    let x1 = (x + w).round().clamp(0.0, max_w as f64) as u32;
    let y1 = (y + h).round().clamp(0.0, max_h as f64) as u32;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(PixelRect {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    })
}
