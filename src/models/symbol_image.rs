use image::{GrayImage, Luma};

/// Raster holding a QR symbol (8-bit luminance, 0 = black)
///
/// Produced by the encoder or by loading a file, consumed by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolImage {
    pixels: GrayImage,
}

impl SymbolImage {
    /// Wrap an existing luminance buffer
    pub fn from_gray(pixels: GrayImage) -> Self {
        Self { pixels }
    }

    /// All-white raster of the given size
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            pixels: GrayImage::from_pixel(width, height, Luma([255])),
        }
    }

    /// Raster width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Raster height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// True when the raster has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }

    /// Luminance at (x, y), `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.pixels.get_pixel_checked(x, y).map(|p| p[0])
    }

    /// Set luminance at (x, y); out of range writes are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) {
        if let Some(p) = self.pixels.get_pixel_mut_checked(x, y) {
            *p = Luma([value]);
        }
    }

    /// Borrow the underlying buffer
    pub fn as_gray(&self) -> &GrayImage {
        &self.pixels
    }

    /// Take the underlying buffer
    pub fn into_gray(self) -> GrayImage {
        self.pixels
    }
}

impl From<GrayImage> for SymbolImage {
    fn from(pixels: GrayImage) -> Self {
        Self::from_gray(pixels)
    }
}
