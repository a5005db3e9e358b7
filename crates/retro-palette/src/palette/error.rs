//! Error types for palette operations
//!
//! This module provides error types for color parsing, palette lookup,
//! registration and quantization.

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing color strings.
///
/// Returned when a hex color has the wrong length or a non-hex character,
/// or when a decimal component is not an integer.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Character that is not a hexadecimal digit
    InvalidHex(char),
    /// Decimal component that is not an integer
    InvalidDecimal(ParseIntError),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(c) => {
                write!(f, "invalid hex character: {:?}", c)
            }
            ParseColorError::InvalidDecimal(err) => {
                write!(f, "invalid decimal component: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidDecimal(err) => Some(err),
            _ => None,
        }
    }
}

/// Why a raw palette entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidEntryReason {
    /// Entry does not have exactly three components
    WrongArity(usize),
    /// A component lies outside 0..=255
    OutOfRange(i64),
}

impl fmt::Display for InvalidEntryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidEntryReason::WrongArity(len) => {
                write!(f, "expected 3 components, got {}", len)
            }
            InvalidEntryReason::OutOfRange(value) => {
                write!(f, "component {} is outside 0..=255", value)
            }
        }
    }
}

/// Error type for palette lookup, registration and matching.
///
/// Every variant is a recoverable value; callers decide the fallback
/// (revert to another palette, skip the filter, ...).
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// No built-in or custom palette is registered under this name
    UnknownPalette {
        /// The name that was looked up
        name: String,
    },
    /// The name belongs to a built-in palette (or is otherwise reserved) and
    /// cannot be used for a custom palette
    ReservedName {
        /// The reserved name
        name: String,
    },
    /// Nearest-color query against a palette with no entries
    EmptyPalette,
    /// A raw palette entry failed validation
    InvalidEntry {
        /// Index of the offending entry
        index: usize,
        /// What was wrong with it
        reason: InvalidEntryReason,
    },
    /// Invalid color string
    ParseColor(ParseColorError),
}

impl From<ParseColorError> for PaletteError {
    fn from(err: ParseColorError) -> Self {
        PaletteError::ParseColor(err)
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::UnknownPalette { name } => {
                write!(f, "unknown palette: {}", name)
            }
            PaletteError::ReservedName { name } => {
                write!(f, "palette name '{}' is reserved", name)
            }
            PaletteError::EmptyPalette => {
                write!(f, "palette has no colors")
            }
            PaletteError::InvalidEntry { index, reason } => {
                write!(f, "invalid palette entry at index {}: {}", index, reason)
            }
            PaletteError::ParseColor(err) => {
                write!(f, "invalid color: {}", err)
            }
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_palette_message() {
        let err = PaletteError::UnknownPalette {
            name: "vaporwave".to_string(),
        };
        assert_eq!(err.to_string(), "unknown palette: vaporwave");
    }

    #[test]
    fn test_reserved_name_message() {
        let err = PaletteError::ReservedName {
            name: "gameboy".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "palette name 'gameboy' is reserved"
        );
    }

    #[test]
    fn test_invalid_entry_message() {
        let err = PaletteError::InvalidEntry {
            index: 2,
            reason: InvalidEntryReason::OutOfRange(300),
        };
        assert_eq!(
            err.to_string(),
            "invalid palette entry at index 2: component 300 is outside 0..=255"
        );

        let err = PaletteError::InvalidEntry {
            index: 0,
            reason: InvalidEntryReason::WrongArity(4),
        };
        assert_eq!(
            err.to_string(),
            "invalid palette entry at index 0: expected 3 components, got 4"
        );
    }

    #[test]
    fn test_parse_color_messages() {
        assert_eq!(
            ParseColorError::InvalidHex('+').to_string(),
            "invalid hex character: '+'"
        );

        let parse_err = "x".parse::<i64>().unwrap_err();
        assert_eq!(
            ParseColorError::InvalidDecimal(parse_err).to_string(),
            "invalid decimal component: invalid digit found in string"
        );
    }

    #[test]
    fn test_parse_color_has_source() {
        use std::error::Error;

        let parse_err = "zz".parse::<u8>().unwrap_err();
        let err = PaletteError::from(ParseColorError::InvalidDecimal(parse_err));
        assert!(err.source().is_some());
        assert!(err.source().and_then(|e| e.source()).is_some());
        assert!(PaletteError::from(ParseColorError::InvalidHex('g'))
            .source()
            .and_then(|e| e.source())
            .is_none());
        assert!(PaletteError::EmptyPalette.source().is_none());
    }
}
