//! QR symbol to text
//!
//! Detection (finder patterns, grid fitting) and data recovery (format
//! information, Reed-Solomon, segment parsing) are done by `rqrr`. This module
//! separates "no symbol here" from "symbol found but unreadable".

use crate::error::{Error, Result};
use crate::models::{DecodedResult, DecodedText, SymbolImage};
use crate::utils::raster_io::read_raster;
use std::path::Path;

/// Locate and read the first decodable symbol in `image`
///
/// Returns `Ok(DecodedResult::NotFound)` when no symbol geometry is found and
/// `Err(Error::Unreadable)` when every located symbol fails validation.
pub fn decode(image: &SymbolImage) -> Result<DecodedResult> {
    if image.is_empty() {
        return Err(Error::InvalidImage {
            width: image.width(),
            height: image.height(),
        });
    }

    let gray = image.as_gray();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        gray.width() as usize,
        gray.height() as usize,
        |x, y| gray.get_pixel(x as u32, y as u32)[0],
    );
    let grids = prepared.detect_grids();

    if grids.is_empty() {
        log::warn!("No QR code detected in image");
        return Ok(DecodedResult::NotFound);
    }
    log::debug!("Located {} candidate symbol(s)", grids.len());

    let mut last_failure = None;
    for (index, grid) in grids.iter().enumerate() {
        match grid.decode() {
            Ok((meta, text)) => {
                log::info!(
                    "Successfully decoded QR code: {} characters (version {})",
                    text.chars().count(),
                    meta.version.0
                );
                return Ok(DecodedResult::Text(DecodedText {
                    text,
                    version: meta.version.0 as u8,
                }));
            }
            Err(err) => {
                log::debug!("Candidate {} failed to decode: {}", index, err);
                last_failure = Some(err.to_string());
            }
        }
    }

    let reason = last_failure.unwrap_or_else(|| "no candidate decoded".to_string());
    log::warn!("QR code located but unreadable: {}", reason);
    Err(Error::Unreadable(reason))
}

/// Load `path` and decode it
pub fn decode_file(path: &Path) -> Result<DecodedResult> {
    log::info!("Decoding QR code from {}", path.display());
    let image = read_raster(path)?;
    decode(&image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::models::SymbolOptions;
    use image::GrayImage;
    use std::num::NonZeroU32;

    fn small_options() -> SymbolOptions {
        SymbolOptions::default().with_module_size(NonZeroU32::new(4).unwrap())
    }

    #[test]
    fn test_decode_empty_raster() {
        let img = SymbolImage::from_gray(GrayImage::new(0, 0));
        assert!(matches!(
            decode(&img),
            Err(Error::InvalidImage {
                width: 0,
                height: 0
            })
        ));
    }

    #[test]
    fn test_decode_blank_is_not_found() {
        let result = decode(&SymbolImage::blank(200, 200)).unwrap();
        assert_eq!(result, DecodedResult::NotFound);
    }

    #[test]
    fn test_decode_encoded_symbol() {
        let img = encode("HELLO", &small_options()).unwrap();
        match decode(&img).unwrap() {
            DecodedResult::Text(decoded) => {
                assert_eq!(decoded.text, "HELLO");
                assert_eq!(decoded.version, 1);
            }
            DecodedResult::NotFound => panic!("symbol not found"),
        }
    }

    #[test]
    fn test_decode_file_missing() {
        let err = decode_file(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
