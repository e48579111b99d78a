//! Luminance conversion for loaded rasters
//!
//! Y = 0.299*R + 0.587*G + 0.114*B, computed as (77*R + 150*G + 29*B) >> 8.
//! Transparent pixels are composited onto white so that a symbol drawn on a
//! transparent background keeps its light modules light.

use image::{DynamicImage, GrayImage};
use rayon::prelude::*;

const COEF_R: u32 = 77;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

/// Images with at least this many pixels are converted on the rayon pool
pub const PARALLEL_THRESHOLD: usize = 1 << 20;

#[inline]
fn rgba_to_luma(px: &[u8]) -> u8 {
    let (r, g, b, a) = (px[0] as u32, px[1] as u32, px[2] as u32, px[3] as u32);
    let lum = ((COEF_R * r + COEF_G * g + COEF_B * b) >> 8).min(255);
    ((lum * a + 255 * (255 - a) + 127) / 255) as u8
}

/// Convert an RGBA8 buffer into luminance over a white background
pub fn rgba_to_luma_over_white(rgba: &[u8], gray: &mut [u8]) {
    if gray.len() >= PARALLEL_THRESHOLD {
        gray.par_iter_mut()
            .zip(rgba.par_chunks_exact(4))
            .for_each(|(out, px)| *out = rgba_to_luma(px));
    } else {
        for (out, px) in gray.iter_mut().zip(rgba.chunks_exact(4)) {
            *out = rgba_to_luma(px);
        }
    }
}

/// Flatten any decoded image to 8-bit luminance
pub fn to_luma(img: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = img {
        return gray.clone();
    }
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut gray = vec![0u8; width as usize * height as usize];
    rgba_to_luma_over_white(rgba.as_raw(), &mut gray);
    // Buffer length is width * height by construction
    GrayImage::from_raw(width, height, gray).unwrap_or_else(|| GrayImage::new(width, height))
}
