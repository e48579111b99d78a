/// Text recovered from a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded payload
    pub text: String,
    /// Symbol version (1-40)
    pub version: u8,
}

/// Outcome of a decode attempt that did not fail
///
/// A symbol that was found but could not be read is reported as
/// [`Error::Unreadable`](crate::Error::Unreadable) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedResult {
    /// A symbol was found and read
    Text(DecodedText),
    /// No symbol geometry in the image
    NotFound,
}

impl DecodedResult {
    /// Decoded payload, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            DecodedResult::Text(decoded) => Some(&decoded.text),
            DecodedResult::NotFound => None,
        }
    }

    /// True when no symbol was found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DecodedResult::NotFound)
    }
}
