//! Reading and writing raster files
//!
//! File handles live only inside these functions and are closed on every
//! exit path.

use crate::error::{Error, Result};
use crate::models::SymbolImage;
use crate::utils::grayscale::to_luma;
use image::{ImageError, ImageFormat, ImageReader};
use std::fs::{self, File};
use std::io::{self, BufReader, Cursor, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a raster file and convert it to luminance
pub fn read_raster(path: &Path) -> Result<SymbolImage> {
    let metadata = fs::metadata(path).map_err(|e| open_error(path, e))?;
    if !metadata.is_file() {
        return Err(Error::NotAFile(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = ImageReader::new(BufReader::new(file));
    if let Ok(format) = ImageFormat::from_path(path) {
        reader.set_format(format);
    }
    // Content sniffing wins over the extension
    let reader = reader
        .with_guessed_format()
        .map_err(|e| open_error(path, e))?;

    let decoded = reader.decode().map_err(|e| decode_error(path, e))?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(Error::InvalidImage {
            width: decoded.width(),
            height: decoded.height(),
        });
    }

    log::debug!(
        "Read {} ({}x{}, {:?})",
        path.display(),
        decoded.width(),
        decoded.height(),
        decoded.color()
    );
    Ok(SymbolImage::from_gray(to_luma(&decoded)))
}

/// Format implied by the extension; PNG when there is none
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    if path.extension().is_none() {
        return Ok(ImageFormat::Png);
    }
    ImageFormat::from_path(path).map_err(|e| Error::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write `image` to `path`
///
/// The raster is encoded in memory and written to a temporary file next to
/// `path`, which then replaces it. A failure at any step leaves an existing
/// file at `path` untouched.
pub fn write_raster(image: &SymbolImage, path: &Path) -> Result<()> {
    let format = output_format(path)?;

    let mut encoded = Cursor::new(Vec::new());
    image
        .as_gray()
        .write_to(&mut encoded, format)
        .map_err(|err| encode_error(path, err))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_error = |e: io::Error| Error::WriteError {
        path: path.to_path_buf(),
        source: ImageError::IoError(e),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(write_error)?;
    staged
        .write_all(encoded.get_ref())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(write_error)?;
    staged.persist(path).map_err(|e| write_error(e.error))?;

    log::debug!(
        "Wrote {} as {:?} ({} bytes)",
        path.display(),
        format,
        encoded.get_ref().len()
    );
    Ok(())
}

fn encode_error(path: &Path, err: ImageError) -> Error {
    match err {
        ImageError::Unsupported(e) => Error::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
        other => Error::WriteError {
            path: path.to_path_buf(),
            source: other,
        },
    }
}

fn open_error(path: &Path, err: io::Error) -> Error {
    match err.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::ReadError {
            path: path.to_path_buf(),
            source: err,
        },
    }
}

fn decode_error(path: &Path, err: ImageError) -> Error {
    match err {
        // Truncated or garbled data surfaces as I/O errors from some decoders
        ImageError::IoError(e)
            if !matches!(
                e.kind(),
                io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData
            ) =>
        {
            Error::ReadError {
                path: path.to_path_buf(),
                source: e,
            }
        }
        other => Error::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: other.to_string(),
        },
    }
}
