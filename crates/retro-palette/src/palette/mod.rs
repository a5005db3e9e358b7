//! Palette types and utilities
//!
//! This module provides the [`Palette`] type, the built-in catalog and the
//! error types for parsing, validation and lookup.

mod builtin;
mod error;
mod palette;

pub use builtin::BuiltinPalette;
pub use error::{InvalidEntryReason, PaletteError, ParseColorError};
pub use palette::Palette;
