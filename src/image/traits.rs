/// Read-only access to an interleaved 8-bit raster.
///
/// Rows are addressed through `stride` (bytes between the starts of two
/// consecutive rows) so that padded buffers can be viewed without copying.
pub trait ImageView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn stride(&self) -> usize;
    /// Interleaved samples per pixel (3 for RGB, 4 for RGBA).
    fn channels(&self) -> usize;

    /// Samples of row `y`, `width * channels` bytes long.
    fn row(&self, y: usize) -> &[u8];

    fn rows(&self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { image: self, y: 0 }
    }

    /// Sum of the red, green and blue samples at `(x, y)`.
    ///
    /// Alpha (if present) is ignored. Dividing by 3 gives the pixel
    /// brightness on the 0–255 scale.
    #[inline]
    fn rgb_sum(&self, x: usize, y: usize) -> u32 {
        let c = self.channels();
        let px = &self.row(y)[x * c..x * c + 3];
        px[0] as u32 + px[1] as u32 + px[2] as u32
    }
}

pub struct Rows<'a, I: ?Sized + ImageView> {
    image: &'a I,
    y: usize,
}

impl<'a, I: ImageView> Iterator for Rows<'a, I> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.image.height() {
            return None;
        }
        let y = self.y;
        self.y += 1;
        Some(self.image.row(y))
    }
}
