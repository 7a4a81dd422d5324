use crate::error::SplitError;

/// Borrowed view over interleaved 8-bit RGB or RGBA pixels.
#[derive(Clone, Debug)]
pub struct ImageRgb8<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub channels: usize,
    pub data: &'a [u8],
}

impl<'a> ImageRgb8<'a> {
    /// View over a tightly packed buffer.
    pub fn packed(w: usize, h: usize, channels: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            stride: w * channels,
            channels,
            data,
        }
    }

    /// Brightness `(R + G + B) / 3` of the pixel at `(x, y)`.
    #[inline]
    pub fn brightness(&self, x: usize, y: usize) -> f32 {
        use crate::image::traits::ImageView;
        self.rgb_sum(x, y) as f32 / 3.0
    }

    /// Check that the view describes a readable RGB(A) layout.
    pub fn validate(&self) -> Result<(), SplitError> {
        if self.channels < 3 {
            return Err(SplitError::UnsupportedLayout {
                channels: self.channels,
            });
        }
        if self.h == 0 || self.w == 0 {
            return Ok(());
        }
        let row_bytes = self.w * self.channels;
        let needed = (self.h - 1) * self.stride + row_bytes;
        if self.stride < row_bytes || self.data.len() < needed {
            return Err(SplitError::Geometry(format!(
                "pixel buffer too small: {}x{}x{} with stride {} needs {} bytes, got {}",
                self.w,
                self.h,
                self.channels,
                self.stride,
                needed,
                self.data.len()
            )));
        }
        Ok(())
    }
}

impl<'a> crate::image::traits::ImageView for ImageRgb8<'a> {
    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }
}
