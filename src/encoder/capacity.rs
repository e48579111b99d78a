//! Symbol capacity per version and error correction level
//!
//! Character capacities are derived from the data codeword count, the mode
//! indicator and the character count field width, which gives the same
//! figures as the tables in ISO/IEC 18004.

use crate::models::ErrorCorrection;

/// Data encoding mode used for a capacity lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Digits 0-9
    Numeric,
    /// 0-9, A-Z, space and `$%*+-./:`
    Alphanumeric,
    /// Arbitrary bytes
    Byte,
}

impl DataMode {
    /// Cheapest mode able to carry every byte of `data`
    pub fn classify(data: &[u8]) -> Self {
        if data.iter().all(u8::is_ascii_digit) {
            DataMode::Numeric
        } else if data.iter().all(|&b| is_alphanumeric(b)) {
            DataMode::Alphanumeric
        } else {
            DataMode::Byte
        }
    }

    fn char_count_bits(&self, version: u8) -> usize {
        let band = match version {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match self {
            DataMode::Numeric => [10, 12, 14][band],
            DataMode::Alphanumeric => [9, 11, 13][band],
            DataMode::Byte => [8, 16, 16][band],
        }
    }
}

fn is_alphanumeric(b: u8) -> bool {
    b.is_ascii_digit() || b.is_ascii_uppercase() || b" $%*+-./:".contains(&b)
}

// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23,
        25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

fn ec_level_index(ec_level: ErrorCorrection) -> usize {
    match ec_level {
        ErrorCorrection::Low => 0,
        ErrorCorrection::Medium => 1,
        ErrorCorrection::Quartile => 2,
        ErrorCorrection::High => 3,
    }
}

/// Modules available for codewords once function patterns are removed
fn raw_data_modules(version: u8) -> usize {
    let v = version as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Data codewords for a version and level, `None` for versions outside 1..=40
pub fn data_codewords(version: u8, ec_level: ErrorCorrection) -> Option<usize> {
    if !(1..=40).contains(&version) {
        return None;
    }
    let idx = ec_level_index(ec_level);
    let ecc = ECC_CODEWORDS_PER_BLOCK[idx][version as usize] as usize;
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][version as usize] as usize;
    Some(raw_data_modules(version) / 8 - ecc * blocks)
}

/// Maximum characters of a single-mode payload
pub fn capacity(version: u8, ec_level: ErrorCorrection, mode: DataMode) -> Option<usize> {
    let data_bits = data_codewords(version, ec_level)? * 8;
    let available = data_bits.checked_sub(4 + mode.char_count_bits(version))?;
    let count = match mode {
        // 10 bits per 3 digits, 4 or 7 for a trailing 1 or 2
        DataMode::Numeric => {
            let full = available / 10 * 3;
            match available % 10 {
                r if r >= 7 => full + 2,
                r if r >= 4 => full + 1,
                _ => full,
            }
        }
        // 11 bits per pair, 6 for a trailing character
        DataMode::Alphanumeric => {
            let full = available / 11 * 2;
            if available % 11 >= 6 { full + 1 } else { full }
        }
        DataMode::Byte => available / 8,
    };
    // The count field caps how many characters can be declared
    let max_declared = (1usize << mode.char_count_bits(version)) - 1;
    Some(count.min(max_declared))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version1_capacities() {
        // ISO/IEC 18004 table 7, version 1
        assert_eq!(capacity(1, ErrorCorrection::Low, DataMode::Numeric), Some(41));
        assert_eq!(capacity(1, ErrorCorrection::Low, DataMode::Alphanumeric), Some(25));
        assert_eq!(capacity(1, ErrorCorrection::Low, DataMode::Byte), Some(17));
        assert_eq!(capacity(1, ErrorCorrection::High, DataMode::Numeric), Some(17));
        assert_eq!(capacity(1, ErrorCorrection::High, DataMode::Alphanumeric), Some(10));
        assert_eq!(capacity(1, ErrorCorrection::High, DataMode::Byte), Some(7));
    }

    #[test]
    fn test_version40_capacities() {
        assert_eq!(capacity(40, ErrorCorrection::Low, DataMode::Numeric), Some(7089));
        assert_eq!(capacity(40, ErrorCorrection::Low, DataMode::Alphanumeric), Some(4296));
        assert_eq!(capacity(40, ErrorCorrection::Low, DataMode::Byte), Some(2953));
        assert_eq!(capacity(40, ErrorCorrection::High, DataMode::Byte), Some(1273));
    }

    #[test]
    fn test_mid_versions() {
        assert_eq!(capacity(10, ErrorCorrection::Medium, DataMode::Byte), Some(213));
        assert_eq!(capacity(4, ErrorCorrection::High, DataMode::Alphanumeric), Some(50));
    }

    #[test]
    fn test_data_codewords() {
        assert_eq!(data_codewords(1, ErrorCorrection::Low), Some(19));
        assert_eq!(data_codewords(5, ErrorCorrection::Quartile), Some(62));
        assert_eq!(data_codewords(0, ErrorCorrection::Low), None);
        assert_eq!(data_codewords(41, ErrorCorrection::Low), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(DataMode::classify(b"0123"), DataMode::Numeric);
        assert_eq!(DataMode::classify(b"HELLO WORLD"), DataMode::Alphanumeric);
        assert_eq!(DataMode::classify(b"hello"), DataMode::Byte);
    }
}
