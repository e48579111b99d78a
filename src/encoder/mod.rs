//! Text to QR symbol
//!
//! Symbol construction (segmenting, Reed-Solomon, masking) is done by the
//! `qrcode` crate. This module picks the version, keeps UTF-8 input byte
//! exact and renders the module grid into a [`SymbolImage`].

/// Character capacity tables
pub mod capacity;
/// Module grid rasterization
pub mod render;

pub use render::{render, render_grid};

use crate::error::{Error, Result};
use crate::models::{ErrorCorrection, ModuleGrid, SymbolImage, SymbolOptions};
use qrcode::bits::Bits;
use qrcode::optimize::Parser;
use qrcode::types::{Mode, QrError};
use qrcode::{Color, QrCode, QrResult, Version};

/// Module grid of an encoded symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSymbol {
    /// Dark/light modules, without quiet zone
    pub modules: ModuleGrid,
    /// Version that was selected (1-40)
    pub version: u8,
    /// Error correction level used
    pub ec_level: ErrorCorrection,
}

/// Encode `text` and rasterize it
pub fn encode(text: &str, options: &SymbolOptions) -> Result<SymbolImage> {
    let symbol = encode_modules(text, options)?;
    let image = render(&symbol, options);
    log::info!(
        "Generated version {} symbol ({}x{} px) for text of length {}",
        symbol.version,
        image.width(),
        image.height(),
        text.len()
    );
    Ok(image)
}

/// Encode `text` into a module grid using the smallest allowed version that fits
pub fn encode_modules(text: &str, options: &SymbolOptions) -> Result<EncodedSymbol> {
    if text.trim().is_empty() {
        log::error!("Attempted to generate QR code with empty text");
        return Err(Error::EmptyText);
    }
    options.validate()?;

    let data = text.as_bytes();
    let ec_level = options.ec_level;
    let candidates = options.version.candidates();
    let max_version = *candidates.end();

    for version in candidates {
        match build_symbol(data, version, ec_level) {
            Ok(code) => {
                options.check_raster_size(version)?;
                log::debug!(
                    "Text of {} bytes fits version {} at level {}",
                    data.len(),
                    version,
                    ec_level
                );
                let modules = ModuleGrid::from_dark_flags(
                    code.width(),
                    code.to_colors().into_iter().map(|c| c == Color::Dark),
                )
                .ok_or_else(|| Error::Encoding("module count does not match symbol width".into()))?;
                return Ok(EncodedSymbol {
                    modules,
                    version,
                    ec_level,
                });
            }
            Err(QrError::DataTooLong) => continue,
            Err(QrError::InvalidVersion) => {
                return Err(Error::InvalidOptions(format!("version {version} rejected")));
            }
            Err(err) => {
                log::error!("QR code generation failed: {}", err);
                return Err(Error::Encoding(err.to_string()));
            }
        }
    }

    log::warn!(
        "Text of {} bytes exceeds capacity up to version {} at level {}",
        data.len(),
        max_version,
        ec_level
    );
    Err(Error::CapacityExceeded {
        len: data.len(),
        ec_level,
        max_version,
    })
}

fn build_symbol(data: &[u8], version: u8, ec_level: ErrorCorrection) -> QrResult<QrCode> {
    let version = Version::Normal(i16::from(version));
    let mut bits = Bits::new(version);
    for segment in Parser::new(data).optimize(version) {
        let chunk = &data[segment.begin..segment.end];
        match segment.mode {
            Mode::Numeric => bits.push_numeric_data(chunk)?,
            Mode::Alphanumeric => bits.push_alphanumeric_data(chunk)?,
            // Kanji mode would reinterpret UTF-8 as Shift JIS on the reading side
            Mode::Byte | Mode::Kanji => bits.push_byte_data(chunk)?,
        }
    }
    bits.push_terminator(ec_level.to_qrcode())?;
    QrCode::with_bits(bits, ec_level.to_qrcode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SymbolVersion;
    use std::num::NonZeroU32;

    #[test]
    fn test_empty_text_rejected() {
        let opts = SymbolOptions::default();
        assert!(matches!(encode("", &opts), Err(Error::EmptyText)));
        assert!(matches!(encode("  \n\t", &opts), Err(Error::EmptyText)));
    }

    #[test]
    fn test_hello_picks_version_one() {
        let symbol = encode_modules("HELLO", &SymbolOptions::default()).unwrap();
        assert_eq!(symbol.version, 1);
        assert_eq!(symbol.modules.width(), 21);
        assert_eq!(symbol.ec_level, ErrorCorrection::High);
    }

    #[test]
    fn test_finder_pattern_corners_are_dark() {
        let symbol = encode_modules("HELLO", &SymbolOptions::default()).unwrap();
        let w = symbol.modules.width();
        assert!(symbol.modules.get(0, 0));
        assert!(symbol.modules.get(w - 1, 0));
        assert!(symbol.modules.get(0, w - 1));
        // separator next to the top-left finder
        assert!(!symbol.modules.get(7, 0));
    }

    #[test]
    fn test_fixed_version_is_respected() {
        let opts = SymbolOptions::default().with_version(SymbolVersion::Fixed(4));
        let symbol = encode_modules("HELLO", &opts).unwrap();
        assert_eq!(symbol.version, 4);
        assert_eq!(symbol.modules.width(), 33);
    }

    #[test]
    fn test_at_least_grows_when_needed() {
        let opts = SymbolOptions::default()
            .with_ec_level(ErrorCorrection::Low)
            .with_version(SymbolVersion::AtLeast(2));
        assert_eq!(encode_modules("hi", &opts).unwrap().version, 2);

        // 33 bytes exceed version 2-L (32 bytes)
        let text = "a".repeat(33);
        assert_eq!(encode_modules(&text, &opts).unwrap().version, 3);
    }

    #[test]
    fn test_capacity_exceeded_reports_limits() {
        let opts = SymbolOptions::default()
            .with_ec_level(ErrorCorrection::Low)
            .with_version(SymbolVersion::Fixed(1));
        let err = encode("a".repeat(18).as_str(), &opts).unwrap_err();
        match err {
            Error::CapacityExceeded {
                len,
                ec_level,
                max_version,
            } => {
                assert_eq!(len, 18);
                assert_eq!(ec_level, ErrorCorrection::Low);
                assert_eq!(max_version, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_image_size_follows_options() {
        let opts = SymbolOptions::default()
            .with_module_size(NonZeroU32::new(3).unwrap())
            .with_border(4);
        let img = encode("HELLO", &opts).unwrap();
        assert_eq!(img.width(), (21 + 8) * 3);
        assert_eq!(img.height(), img.width());
    }

    #[test]
    fn test_kanji_like_bytes_stay_in_byte_mode() {
        // "中" is E4 B8 AD; E4 B8 would qualify as a Shift JIS pair
        let symbol = encode_modules("中文", &SymbolOptions::default());
        assert!(symbol.is_ok());
    }

    #[test]
    fn test_oversized_raster_rejected_before_rendering() {
        let opts = SymbolOptions::default().with_module_size(NonZeroU32::new(100).unwrap());
        // Version 1 stays within the pixel limit
        assert!(encode_modules("HELLO", &opts).is_ok());
        // Anything past version 35 would not
        let len = capacity::capacity(35, ErrorCorrection::High, capacity::DataMode::Byte).unwrap();
        let text = "x".repeat(len + 1);
        assert!(matches!(
            encode(&text, &opts),
            Err(Error::InvalidOptions(_))
        ));
    }
}
