//! PGM sub-format detection
//!
//! Detects the PGM variant by examining the magic token at the start of
//! the data.

use std::fmt;

/// Magic tokens for the supported PGM variants
mod magic {
    /// ASCII graymap: "P2"
    pub const PGM_ASCII: &[u8] = b"P2";

    /// Binary graymap: "P5"
    pub const PGM_BINARY: &[u8] = b"P5";
}

/// PGM sample encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PgmEncoding {
    /// Whitespace-separated decimal samples (`P2`)
    #[default]
    Ascii,
    /// Raw bytes, one per sample (`P5`)
    Binary,
}

impl PgmEncoding {
    /// Get the magic token written at the start of the file.
    pub fn magic(self) -> &'static [u8] {
        match self {
            Self::Ascii => magic::PGM_ASCII,
            Self::Binary => magic::PGM_BINARY,
        }
    }

    /// Parse an encoding name (`ascii`/`p2` or `binary`/`p5`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ascii" | "p2" => Some(Self::Ascii),
            "binary" | "p5" => Some(Self::Binary),
            _ => None,
        }
    }
}

impl fmt::Display for PgmEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascii => write!(f, "ascii (P2)"),
            Self::Binary => write!(f, "binary (P5)"),
        }
    }
}

/// Detect the PGM encoding from the first bytes of a file.
///
/// Returns `None` if the data does not start with `P2` or `P5`.
pub fn detect_encoding(data: &[u8]) -> Option<PgmEncoding> {
    if data.starts_with(magic::PGM_BINARY) {
        Some(PgmEncoding::Binary)
    } else if data.starts_with(magic::PGM_ASCII) {
        Some(PgmEncoding::Ascii)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pgm() {
        assert_eq!(
            detect_encoding(b"P5\n2 2\n255\n"),
            Some(PgmEncoding::Binary)
        );
        assert_eq!(detect_encoding(b"P2 2 2 255"), Some(PgmEncoding::Ascii));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(detect_encoding(b"P6\n"), None);
        assert_eq!(detect_encoding(b"P"), None);
        assert_eq!(detect_encoding(b""), None);
    }

    #[test]
    fn test_encoding_names() {
        assert_eq!(PgmEncoding::from_name("Binary"), Some(PgmEncoding::Binary));
        assert_eq!(PgmEncoding::from_name(" p2 "), Some(PgmEncoding::Ascii));
        assert_eq!(PgmEncoding::from_name("png"), None);
    }
}
