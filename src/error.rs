//! Error taxonomy for encode, decode and session operations
//!
//! Every variant is recoverable: callers report the message and let the user
//! retry. None of them leaves a [`Session`](crate::session::Session) half
//! updated.

use crate::models::ErrorCorrection;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the codec and the session state
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing but whitespace was given to the encoder
    #[error("Cannot generate QR code from empty text")]
    EmptyText,

    /// The payload does not fit in any allowed symbol version
    #[error(
        "Text of {len} bytes does not fit in a version {max_version} symbol at error correction level {ec_level}"
    )]
    CapacityExceeded {
        /// Payload length in bytes
        len: usize,
        /// Requested error correction level
        ec_level: ErrorCorrection,
        /// Largest version that was tried
        max_version: u8,
    },

    /// Symbol options out of range
    #[error("Invalid symbol options: {0}")]
    InvalidOptions(String),

    /// The encoding library rejected the payload for a reason other than size
    #[error("Failed to generate QR code: {0}")]
    Encoding(String),

    /// Raster with no pixels
    #[error("Invalid image: {width}x{height} raster")]
    InvalidImage {
        /// Raster width
        width: u32,
        /// Raster height
        height: u32,
    },

    /// A symbol was located but its data could not be recovered
    #[error("Failed to decode QR code from image: {0}")]
    Unreadable(String),

    /// Input path does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input path exists but is not a regular file
    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The file is not a raster format we can read or write
    #[error("Unsupported image format for {}: {reason}", path.display())]
    UnsupportedFormat {
        /// File that was rejected
        path: PathBuf,
        /// What the image codec reported
        reason: String,
    },

    /// I/O failure while reading an image file
    #[error("Failed to read {}: {source}", path.display())]
    ReadError {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while writing an image file
    #[error("Failed to save file {}: {source}", path.display())]
    WriteError {
        /// Destination path
        path: PathBuf,
        /// Underlying codec or I/O error
        #[source]
        source: image::ImageError,
    },

    /// `save` called on an empty session
    #[error("No image to save")]
    NoImageToSave,

    /// `decode_current` called on an empty session
    #[error("No image loaded")]
    NoImageToDecode,
}

impl Error {
    /// True for errors raised at the file boundary (load/save)
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::FileNotFound(_)
                | Error::NotAFile(_)
                | Error::UnsupportedFormat { .. }
                | Error::ReadError { .. }
                | Error::WriteError { .. }
        )
    }
}
