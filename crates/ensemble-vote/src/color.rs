//! 8-bit RGBA color type used as the exact-match voting key.

/// A color in 8-bit-per-channel RGBA.
///
/// Votes are counted on the exact quadruple, alpha included, so the type
/// derives `Eq` and `Hash` for use as a frequency-table key. Blended output
/// colors always carry `a = 255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
    /// Alpha channel (0..=255)
    pub a: u8,
}

impl Rgba {
    /// Fully opaque white, the fade target for low-agreement pixels.
    pub const WHITE: Rgba = Rgba {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Create a color from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Pack into a `u32` as `0xRRGGBBAA`.
    ///
    /// This packing defines the total order used to break ties during
    /// vote counting: of two colors with equal counts, the one with the
    /// smaller packed value wins.
    #[inline]
    pub const fn packed(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }
}
