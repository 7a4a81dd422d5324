//! I/O helpers around the `image` crate.
//!
//! - `decode_image`: decode an in-memory PNG/JPEG/WebP into an owned RGB buffer.
//! - `load_image`: read and decode a file from disk.
//! - `encode_rgb`: encode an RGB raster as PNG or JPEG bytes.
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `write_bytes_file`: write encoded bytes, creating parent directories.
use super::ImageRgb8;
use crate::error::SplitError;
use crate::extractor::OutputFormat;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned, tightly packed 8-bit RGB buffer with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct RgbImageBuf {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbImageBuf {
    /// Construct an owned buffer from packed RGB bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageRgb8` view
    pub fn as_view(&self) -> ImageRgb8<'_> {
        ImageRgb8::packed(self.width, self.height, 3, &self.data)
    }
}

impl From<RgbImage> for RgbImageBuf {
    fn from(img: RgbImage) -> Self {
        let width = img.width() as usize;
        let height = img.height() as usize;
        Self::new(width, height, img.into_raw())
    }
}

/// Decode an encoded image held in memory. Alpha is dropped.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImageBuf, SplitError> {
    let img = image::load_from_memory(bytes).map_err(SplitError::Decode)?;
    Ok(img.into_rgb8().into())
}

/// Read an image file from disk and decode it.
pub fn load_image(path: &Path) -> Result<RgbImageBuf, SplitError> {
    let bytes = fs::read(path).map_err(|source| SplitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(&bytes)
}

/// Encode an RGB raster in the requested output format.
pub fn encode_rgb(img: &RgbImage, format: OutputFormat) -> Result<Vec<u8>, SplitError> {
    format.validate()?;
    let mut encoded = Vec::new();
    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut encoded)
                .write_image(
                    img.as_raw(),
                    img.width(),
                    img.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(SplitError::Encode)?;
        }
        OutputFormat::Jpeg { quality } => {
            JpegEncoder::new_with_quality(&mut encoded, quality)
                .write_image(
                    img.as_raw(),
                    img.width(),
                    img.height(),
                    ExtendedColorType::Rgb8,
                )
                .map_err(SplitError::Encode)?;
        }
    }
    Ok(encoded)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Write raw bytes to `path`, creating parent directories.
pub fn write_bytes_file(path: &Path, bytes: &[u8]) -> Result<(), String> {
    ensure_parent_dir(path)?;
    fs::write(path, bytes).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
