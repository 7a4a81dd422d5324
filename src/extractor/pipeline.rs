use super::geometry::{plan_cells, CropRegion};
use super::options::ExtractOptions;
use super::resample::render_crop;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{ExtractionReport, InputDescriptor, TimingBreakdown};
use crate::error::SplitError;
use crate::image::io::encode_rgb;
use crate::image::ImageRgb8;
use crate::types::ExtractedFrame;
use log::debug;
use std::time::Instant;

/// Cuts every grid cell out of a composite and renders it at the fixed
/// output size of the requested aspect ratio.
#[derive(Clone, Debug, Default)]
pub struct FrameExtractor {
    options: ExtractOptions,
}

impl FrameExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract `rows × cols` frames in row-major order, or fail as a whole.
    pub fn extract(&self, img: &ImageRgb8) -> Result<Vec<ExtractedFrame>, SplitError> {
        Ok(self.extract_with_diagnostics(img)?.0)
    }

    pub fn extract_with_diagnostics(
        &self,
        img: &ImageRgb8,
    ) -> Result<(Vec<ExtractedFrame>, ExtractionReport), SplitError> {
        img.validate()?;
        self.options.format.validate()?;
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let plan = timings.time("plan", || plan_cells(img.w, img.h, &self.options))?;
        let (out_w, out_h) = self.options.aspect_ratio.output_size();
        debug!(
            "FrameExtractor::extract w={} h={} grid={}x{} gutter=({}, {}) trim={} out={}x{}",
            img.w,
            img.h,
            self.options.grid.rows,
            self.options.grid.cols,
            self.options.grid.gutter_x,
            self.options.grid.gutter_y,
            self.options.trim,
            out_w,
            out_h
        );

        let frames = timings.time("render", || self.render_all(img, &plan))?;
        timings.total_ms = elapsed_ms(total_start);

        let report = ExtractionReport {
            input: InputDescriptor {
                width: img.w,
                height: img.h,
                channels: img.channels,
            },
            aspect_ratio: self.options.aspect_ratio,
            output_width: out_w,
            output_height: out_h,
            plan,
            timings,
        };
        Ok((frames, report))
    }

    fn render_one(
        &self,
        img: &ImageRgb8,
        region: &CropRegion,
    ) -> Result<ExtractedFrame, SplitError> {
        let (out_w, out_h) = self.options.aspect_ratio.output_size();
        let raster = render_crop(img, region.pixels, out_w, out_h, self.options.filter)?;
        let image_data = encode_rgb(&raster, self.options.format)?;
        debug!(
            "cell ({}, {}) crop={}x{}+{}+{} -> {} bytes",
            region.cell.row,
            region.cell.col,
            region.pixels.width,
            region.pixels.height,
            region.pixels.x,
            region.pixels.y,
            image_data.len()
        );
        Ok(ExtractedFrame {
            image_data,
            row: region.cell.row,
            col: region.cell.col,
        })
    }

    #[cfg(feature = "parallel")]
    fn render_all(
        &self,
        img: &ImageRgb8,
        plan: &[CropRegion],
    ) -> Result<Vec<ExtractedFrame>, SplitError> {
        use rayon::prelude::*;

        plan.par_iter()
            .map(|region| self.render_one(img, region))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn render_all(
        &self,
        img: &ImageRgb8,
        plan: &[CropRegion],
    ) -> Result<Vec<ExtractedFrame>, SplitError> {
        plan.iter()
            .map(|region| self.render_one(img, region))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::options::{AspectRatio, GridConfig, ResampleFilter};
    use crate::image::io::decode_image;

    /// 3x3 composite with 6px gutters where each cell has its own grey level.
    fn composite(w: usize, h: usize, gutter: usize) -> Vec<u8> {
        let cw = (w - 2 * gutter) / 3;
        let ch = (h - 2 * gutter) / 3;
        let mut data = vec![0u8; w * h * 3];
        for y in 0..h {
            for x in 0..w {
                let (cx, rx) = (x / (cw + gutter), x % (cw + gutter));
                let (cy, ry) = (y / (ch + gutter), y % (ch + gutter));
                let v = if rx >= cw || ry >= ch {
                    0
                } else {
                    (40 + 20 * (cy.min(2) * 3 + cx.min(2))) as u8
                };
                let i = (y * w + x) * 3;
                data[i..i + 3].copy_from_slice(&[v, v, v]);
            }
        }
        data
    }

    fn options(aspect_ratio: AspectRatio) -> ExtractOptions {
        ExtractOptions {
            grid: GridConfig::uniform(6),
            trim: 2,
            aspect_ratio,
            filter: ResampleFilter::Nearest,
            ..Default::default()
        }
    }

    #[test]
    fn frames_are_row_major_with_cell_content() {
        let (w, h) = (312usize, 180usize);
        let data = composite(w, h, 6);
        let img = ImageRgb8::packed(w, h, 3, &data);
        let frames = FrameExtractor::new(options(AspectRatio::Landscape))
            .extract(&img)
            .unwrap();
        assert_eq!(frames.len(), 9);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!((frame.row, frame.col), (i / 3, i % 3));
            let decoded = decode_image(&frame.image_data).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (1920, 1080));
            let expected = (40 + 20 * i) as f32;
            let view = decoded.as_view();
            assert_eq!(view.brightness(0, 0), expected);
            assert_eq!(view.brightness(1919, 1079), expected);
        }
    }

    #[test]
    fn portrait_frames_have_portrait_size() {
        let (w, h) = (312usize, 180usize);
        let data = composite(w, h, 6);
        let img = ImageRgb8::packed(w, h, 3, &data);
        let (frames, report) = FrameExtractor::new(options(AspectRatio::Portrait))
            .extract_with_diagnostics(&img)
            .unwrap();
        assert_eq!(report.plan.len(), 9);
        assert_eq!((report.output_width, report.output_height), (1080, 1920));
        let decoded = decode_image(&frames[4].image_data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (1080, 1920));
    }

    #[test]
    fn invalid_gutter_yields_no_frames() {
        let data = vec![128u8; 30 * 30 * 3];
        let img = ImageRgb8::packed(30, 30, 3, &data);
        let extractor = FrameExtractor::new(ExtractOptions {
            grid: GridConfig::uniform(15),
            ..Default::default()
        });
        assert!(matches!(extractor.extract(&img), Err(SplitError::Geometry(_))));
    }
}
