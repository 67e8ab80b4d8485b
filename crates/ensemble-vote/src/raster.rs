//! In-memory RGBA raster, the input form for aggregation.

use crate::color::Rgba;

/// A decoded image: one [`Rgba`] per pixel in row-major order.
///
/// This is the exchange format between whatever decodes image files and
/// the aggregation stage. Every raster in a group must share the same
/// dimensions; [`aggregate`](crate::aggregate) enforces this.
#[derive(Debug, Clone)]
pub struct Raster {
    pixels: Vec<Rgba>,
    width: u32,
    height: u32,
}

impl Raster {
    /// Create a raster from row-major pixels.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `pixels.len() == width * height`.
    pub fn new(pixels: Vec<Rgba>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count ({}) must match width * height ({}x{}={})",
            pixels.len(),
            width,
            height,
            width as usize * height as usize,
        );
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Raster width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a `(width, height)` pair.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Rgba {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }
}
