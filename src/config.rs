//! Defaults and environment overrides
//!
//! The library itself never reads the environment; only
//! [`SymbolOptions::from_env`](crate::SymbolOptions::from_env) and the
//! logging setup do.

use crate::models::{ErrorCorrection, SymbolOptions, SymbolVersion};
use std::num::NonZeroU32;
use std::sync::OnceLock;

/// Application name shown by the CLI
pub const APP_NAME: &str = "QR Code Generator";
/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error correction level when none is given
pub const DEFAULT_EC_LEVEL: ErrorCorrection = ErrorCorrection::High;
/// Pixels per module when none is given
pub const DEFAULT_MODULE_SIZE: NonZeroU32 = match NonZeroU32::new(20) {
    Some(size) => size,
    None => panic!("default module size must be non-zero"),
};
/// Quiet zone width in modules when none is given
pub const DEFAULT_BORDER: u32 = 2;

/// Largest rendered image, in pixels (16384 x 16384)
pub const MAX_RASTER_PIXELS: u64 = 1 << 28;

/// Extension appended by the CLI when a save path has none
pub const DEFAULT_SAVE_EXTENSION: &str = "png";

/// Extensions picked up when scanning directories for images
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Overrides the error correction level (L, M, Q, H)
pub const ENV_EC_LEVEL: &str = "QR_EC_LEVEL";
/// Overrides pixels per module
pub const ENV_MODULE_SIZE: &str = "QR_MODULE_SIZE";
/// Overrides the quiet zone width
pub const ENV_BORDER: &str = "QR_BORDER";
/// Overrides the version policy (auto, N, N+)
pub const ENV_VERSION: &str = "QR_VERSION";
/// Enables debug logging when set
pub const ENV_DEBUG: &str = "QR_DEBUG";

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
}

pub(crate) fn apply_env_overrides(mut opts: SymbolOptions) -> SymbolOptions {
    if let Some(level) = parse_env::<ErrorCorrection>(ENV_EC_LEVEL) {
        opts.ec_level = level;
    }
    if let Some(size) = parse_env::<u32>(ENV_MODULE_SIZE).and_then(NonZeroU32::new) {
        opts.module_size = size;
    }
    if let Some(border) = parse_env::<u32>(ENV_BORDER) {
        opts.border = border;
    }
    if let Some(version) = parse_env::<SymbolVersion>(ENV_VERSION) {
        opts.version = version;
    }
    opts
}

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// `QR_DEBUG` is set
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var(ENV_DEBUG).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let opts = SymbolOptions::default();
        assert_eq!(opts.ec_level, DEFAULT_EC_LEVEL);
        assert_eq!(opts.module_size, DEFAULT_MODULE_SIZE);
        assert_eq!(opts.border, DEFAULT_BORDER);
    }

    #[test]
    fn test_unset_env_keeps_defaults() {
        // None of the QR_* variables are set by the test harness
        if std::env::var(ENV_EC_LEVEL).is_err()
            && std::env::var(ENV_MODULE_SIZE).is_err()
            && std::env::var(ENV_BORDER).is_err()
            && std::env::var(ENV_VERSION).is_err()
        {
            assert_eq!(SymbolOptions::from_env(), SymbolOptions::default());
        }
    }

    #[test]
    fn test_default_module_size() {
        assert_eq!(DEFAULT_MODULE_SIZE.get(), 20);
        let side = SymbolOptions::default().raster_side(SymbolVersion::MAX);
        assert!(side * side <= MAX_RASTER_PIXELS);
    }
}
