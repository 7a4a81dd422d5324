//! Copy a crop out of the pixel view and scale it to the output size.

use super::geometry::PixelRect;
use super::options::ResampleFilter;
use crate::error::SplitError;
use crate::image::{ImageRgb8, ImageView};
use image::{imageops, RgbImage};

/// Copy `rect` out of `img` as a packed RGB raster (alpha dropped).
pub fn crop_rgb(img: &ImageRgb8, rect: PixelRect) -> Result<RgbImage, SplitError> {
    let (x0, y0) = (rect.x as usize, rect.y as usize);
    let (w, h) = (rect.width as usize, rect.height as usize);
    if x0 + w > img.w || y0 + h > img.h {
        return Err(SplitError::Geometry(format!(
            "crop {}x{}+{}+{} exceeds {}x{} image",
            w, h, x0, y0, img.w, img.h
        )));
    }

    let c = img.channels;
    let mut data = Vec::with_capacity(w * h * 3);
    for row in img.rows().skip(y0).take(h) {
        let src = &row[x0 * c..(x0 + w) * c];
        if c == 3 {
            data.extend_from_slice(src);
        } else {
            for px in src.chunks_exact(c) {
                data.extend_from_slice(&px[..3]);
            }
        }
    }
    RgbImage::from_raw(rect.width, rect.height, data)
        .ok_or_else(|| SplitError::Geometry("crop buffer size mismatch".to_string()))
}

/// Crop and resample in one step.
pub fn render_crop(
    img: &ImageRgb8,
    rect: PixelRect,
    out_w: u32,
    out_h: u32,
    filter: ResampleFilter,
) -> Result<RgbImage, SplitError> {
    let crop = crop_rgb(img, rect)?;
    if crop.dimensions() == (out_w, out_h) {
        return Ok(crop);
    }
    Ok(imageops::resize(&crop, out_w, out_h, filter.into()))
}
