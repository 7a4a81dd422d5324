#![allow(dead_code)]

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

/// Dark gutter drawn across the full height (vertical) or width (horizontal).
#[derive(Clone, Copy, Debug)]
pub struct Gutter {
    pub start: usize,
    pub width: usize,
    pub value: u8,
}

impl Gutter {
    pub fn black(start: usize, width: usize) -> Self {
        Self {
            start,
            width,
            value: 0,
        }
    }
}

/// Generates a packed RGB composite: flat `background` with the given gutters.
pub fn composite_rgb(
    width: usize,
    height: usize,
    background: u8,
    vertical: &[Gutter],
    horizontal: &[Gutter],
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![background; width * height * 3];
    let mut paint = |x: usize, y: usize, v: u8| {
        let i = (y * width + x) * 3;
        img[i..i + 3].copy_from_slice(&[v, v, v]);
    };
    for g in vertical {
        for x in g.start..(g.start + g.width).min(width) {
            for y in 0..height {
                paint(x, y, g.value);
            }
        }
    }
    for g in horizontal {
        for y in g.start..(g.start + g.width).min(height) {
            for x in 0..width {
                paint(x, y, g.value);
            }
        }
    }
    img
}

/// 1920x1080 grey composite with 10px black gutters at x=630/1270 and y=350/720.
pub fn contact_sheet_1080p() -> (usize, usize, Vec<u8>) {
    let (w, h) = (1920usize, 1080usize);
    let data = composite_rgb(
        w,
        h,
        128,
        &[Gutter::black(630, 10), Gutter::black(1270, 10)],
        &[Gutter::black(350, 10), Gutter::black(720, 10)],
    );
    (w, h, data)
}

/// Widens packed RGB to RGBA with an opaque alpha channel.
pub fn with_alpha(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .flat_map(|px| [px[0], px[1], px[2], 255])
        .collect()
}

pub fn encode_png(width: usize, height: usize, rgb: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(rgb, width as u32, height as u32, ExtendedColorType::Rgb8)
        .expect("encode synthetic png");
    out
}
