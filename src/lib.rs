//! RustQR codec - text to QR image and back
//!
//! Encodes text into QR symbol rasters and reads rasters back into text,
//! with a single-slot [`Session`] that holds the current image for saving or
//! re-decoding. Symbol mathematics is delegated to `qrcode` (encoding) and
//! `rqrr` (detection and decoding); this crate drives them, renders the
//! module grid and handles raster files.
//!
//! # Example
//! ```
//! use rust_qr_codec::{DecodedResult, SymbolOptions, decode, encode};
//!
//! let image = encode("HELLO", &SymbolOptions::default()).unwrap();
//! match decode(&image).unwrap() {
//!     DecodedResult::Text(decoded) => assert_eq!(decoded.text, "HELLO"),
//!     DecodedResult::NotFound => unreachable!(),
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Defaults and environment overrides
pub mod config;
/// QR symbol reading (finder detection, error correction via `rqrr`)
pub mod decoder;
/// QR symbol generation (version selection, rendering, capacity tables)
pub mod encoder;
/// Error taxonomy
pub mod error;
/// Logger setup for the binary
pub mod logging;
/// Core data structures (SymbolOptions, SymbolImage, ModuleGrid, DecodedResult)
#[allow(missing_docs)]
pub mod models;
/// Single-slot session state
pub mod session;
/// Batch helpers for the CLI
pub mod tools;
/// Luminance conversion and raster file I/O
#[allow(missing_docs)]
pub mod utils;

pub use decoder::{decode, decode_file};
pub use encoder::{EncodedSymbol, encode, encode_modules};
pub use error::{Error, Result};
pub use models::{
    DecodedResult, DecodedText, ErrorCorrection, ModuleGrid, SymbolImage, SymbolOptions,
    SymbolVersion,
};
pub use session::Session;
