//! Single-slot session state
//!
//! Holds the image the user is currently working with. It is set by a
//! successful generate or load, replaced by the next one (last write wins)
//! and never cleared otherwise. A failed operation leaves it untouched.

use crate::decoder;
use crate::encoder;
use crate::error::{Error, Result};
use crate::models::{DecodedResult, SymbolImage, SymbolOptions};
use crate::utils::raster_io::{read_raster, write_raster};
use std::path::Path;

/// Current image plus the result of the last decode of that image
#[derive(Debug, Default)]
pub struct Session {
    image: Option<SymbolImage>,
    last_result: Option<DecodedResult>,
}

impl Session {
    /// Empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current image; the previous decode result is dropped
    pub fn set_image(&mut self, image: SymbolImage) {
        self.replace(image);
    }

    /// Current image, if any
    pub fn image(&self) -> Option<&SymbolImage> {
        self.image.as_ref()
    }

    /// True until the first successful generate or load
    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    /// Result of the last [`decode_current`](Self::decode_current)
    pub fn last_result(&self) -> Option<&DecodedResult> {
        self.last_result.as_ref()
    }

    /// Encode `text` and make it the current image
    pub fn generate(&mut self, text: &str, options: &SymbolOptions) -> Result<&SymbolImage> {
        let image = encoder::encode(text, options)?;
        Ok(self.replace(image))
    }

    /// Read a raster from `path` and make it the current image
    pub fn load(&mut self, path: &Path) -> Result<&SymbolImage> {
        let image = read_raster(path)?;
        log::info!(
            "Loaded image: {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(self.replace(image))
    }

    /// Write the current image to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let image = self.image.as_ref().ok_or(Error::NoImageToSave)?;
        match write_raster(image, path) {
            Ok(()) => {
                log::info!("Image saved to: {}", path.display());
                Ok(())
            }
            Err(err) => {
                log::error!("Error saving image: {}", err);
                Err(err)
            }
        }
    }

    /// Decode the current image and remember the outcome
    pub fn decode_current(&mut self) -> Result<&DecodedResult> {
        let image = self.image.as_ref().ok_or(Error::NoImageToDecode)?;
        let result = decoder::decode(image)?;
        Ok(self.last_result.insert(result))
    }

    fn replace(&mut self, image: SymbolImage) -> &SymbolImage {
        if self.image.is_some() {
            log::debug!("Replacing current image");
        }
        self.last_result = None;
        self.image.insert(image)
    }
}
