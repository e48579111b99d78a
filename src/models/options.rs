use crate::config;
use crate::error::{Error, Result};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCorrection {
    /// Low (~7% recovery capacity)
    Low,
    /// Medium (~15% recovery capacity)
    Medium,
    /// Quartile (~25% recovery capacity)
    Quartile,
    /// High (~30% recovery capacity)
    High,
}

impl ErrorCorrection {
    /// All levels from least to most redundant
    pub const ALL: [ErrorCorrection; 4] = [
        ErrorCorrection::Low,
        ErrorCorrection::Medium,
        ErrorCorrection::Quartile,
        ErrorCorrection::High,
    ];

    /// Single-letter name (L, M, Q, H)
    pub fn letter(&self) -> char {
        match self {
            ErrorCorrection::Low => 'L',
            ErrorCorrection::Medium => 'M',
            ErrorCorrection::Quartile => 'Q',
            ErrorCorrection::High => 'H',
        }
    }

    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for ErrorCorrection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(ErrorCorrection::Low),
            "m" | "medium" => Ok(ErrorCorrection::Medium),
            "q" | "quartile" => Ok(ErrorCorrection::Quartile),
            "h" | "high" => Ok(ErrorCorrection::High),
            other => Err(Error::InvalidOptions(format!(
                "unknown error correction level '{other}' (expected L, M, Q or H)"
            ))),
        }
    }
}

/// Symbol size selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolVersion {
    /// Smallest version that fits the payload
    #[default]
    Auto,
    /// Exactly this version (1-40)
    Fixed(u8),
    /// Smallest version >= this one that fits
    AtLeast(u8),
}

impl SymbolVersion {
    /// Smallest valid version number
    pub const MIN: u8 = 1;
    /// Largest valid version number
    pub const MAX: u8 = 40;

    /// Versions the encoder may try, smallest first
    pub fn candidates(&self) -> std::ops::RangeInclusive<u8> {
        match *self {
            SymbolVersion::Auto => Self::MIN..=Self::MAX,
            SymbolVersion::Fixed(v) => v..=v,
            SymbolVersion::AtLeast(v) => v..=Self::MAX,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            SymbolVersion::Auto => Ok(()),
            SymbolVersion::Fixed(v) | SymbolVersion::AtLeast(v) => {
                if (Self::MIN..=Self::MAX).contains(&v) {
                    Ok(())
                } else {
                    Err(Error::InvalidOptions(format!(
                        "version {v} is outside 1..=40"
                    )))
                }
            }
        }
    }
}

impl fmt::Display for SymbolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolVersion::Auto => write!(f, "auto"),
            SymbolVersion::Fixed(v) => write!(f, "{v}"),
            SymbolVersion::AtLeast(v) => write!(f, "{v}+"),
        }
    }
}

impl FromStr for SymbolVersion {
    type Err = Error;

    /// Accepts `auto`, `N` or `N+`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(SymbolVersion::Auto);
        }
        let (digits, at_least) = match s.strip_suffix('+') {
            Some(digits) => (digits, true),
            None => (s, false),
        };
        let v = digits
            .parse::<u8>()
            .map_err(|_| Error::InvalidOptions(format!("invalid version '{s}'")))?;
        let version = if at_least {
            SymbolVersion::AtLeast(v)
        } else {
            SymbolVersion::Fixed(v)
        };
        version.validate()?;
        Ok(version)
    }
}

/// Options for a single encode call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolOptions {
    /// Redundancy level
    pub ec_level: ErrorCorrection,
    /// Pixels per module side
    pub module_size: NonZeroU32,
    /// Quiet zone width in modules
    pub border: u32,
    /// Symbol size selection
    pub version: SymbolVersion,
}

impl Default for SymbolOptions {
    fn default() -> Self {
        Self {
            ec_level: config::DEFAULT_EC_LEVEL,
            module_size: config::DEFAULT_MODULE_SIZE,
            border: config::DEFAULT_BORDER,
            version: SymbolVersion::Auto,
        }
    }
}

impl SymbolOptions {
    /// Defaults with `QR_EC_LEVEL`, `QR_MODULE_SIZE`, `QR_BORDER` and
    /// `QR_VERSION` overrides applied
    pub fn from_env() -> Self {
        config::apply_env_overrides(Self::default())
    }

    /// Set the error correction level
    pub fn with_ec_level(mut self, ec_level: ErrorCorrection) -> Self {
        self.ec_level = ec_level;
        self
    }

    /// Set pixels per module
    pub fn with_module_size(mut self, module_size: NonZeroU32) -> Self {
        self.module_size = module_size;
        self
    }

    /// Set the quiet zone width
    pub fn with_border(mut self, border: u32) -> Self {
        self.border = border;
        self
    }

    /// Set the version policy
    pub fn with_version(mut self, version: SymbolVersion) -> Self {
        self.version = version;
        self
    }

    /// Check ranges that the type system does not enforce
    ///
    /// The raster bound is checked against the smallest allowed version here
    /// and against the selected version once encoding has picked one.
    pub fn validate(&self) -> Result<()> {
        self.version.validate()?;
        self.check_raster_size(*self.version.candidates().start())
    }

    /// Pixels per side of the rendered image for `version`
    pub fn raster_side(&self, version: u8) -> u64 {
        let modules = 17 + 4 * u64::from(version) + 2 * u64::from(self.border);
        modules * u64::from(self.module_size.get())
    }

    pub(crate) fn check_raster_size(&self, version: u8) -> Result<()> {
        let side = self.raster_side(version);
        if side.saturating_mul(side) > config::MAX_RASTER_PIXELS {
            return Err(Error::InvalidOptions(format!(
                "module size {} with border {} gives a {side}x{side} px version {version} image, above the {} pixel limit",
                self.module_size,
                self.border,
                config::MAX_RASTER_PIXELS
            )));
        }
        Ok(())
    }
}
