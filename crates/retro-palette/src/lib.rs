#![allow(clippy::module_inception)]

//! retro-palette: fixed retro palettes and nearest-color quantization
//!
//! This library maps 24-bit RGB colors onto small palettes for pixelation
//! and retro filters. It is pure data plus one search: no I/O, no logging,
//! no persistence.
//!
//! # Quick Start
//!
//! ```
//! use retro_palette::{PaletteRegistry, Quantizer, Rgb};
//!
//! let registry = PaletteRegistry::new();
//! let gameboy = registry.get("gameboy").unwrap();
//!
//! let quantizer = Quantizer::new(gameboy).unwrap();
//! assert_eq!(quantizer.map(Rgb::new(10, 10, 10)), Rgb::new(15, 56, 15));
//! ```
//!
//! # Built-in Palettes
//!
//! | Name | Colors |
//! |------|--------|
//! | `grayscale` | 5 evenly spaced greys |
//! | `retro` | black, plum, brick, orange, yellow |
//! | `gameboy` | the 4 handheld greens |
//! | `cyberpunk` | black, magenta, cyan, pink, yellow |
//! | `pastel` | 5 light pastel tones |
//!
//! Built-in names are reserved: registering or removing a custom palette
//! under one of them fails with [`PaletteError::ReservedName`].
//!
//! # Matching
//!
//! Distance is plain Euclidean distance in RGB, compared as squared integer
//! distance. When several entries are equally close the earliest one in the
//! palette wins, so identical inputs always give identical output.
//!
//! ```
//! use retro_palette::{nearest, Rgb};
//!
//! let palette = [Rgb::new(110, 100, 100), Rgb::new(100, 90, 100)];
//! assert_eq!(nearest(Rgb::new(100, 100, 100), &palette), Ok(palette[0]));
//! ```
//!
//! # Custom Palettes
//!
//! Custom palettes may be empty. Looking one up works, matching against it
//! fails with [`PaletteError::EmptyPalette`]:
//!
//! ```
//! use retro_palette::{PaletteError, PaletteRegistry, Rgb};
//!
//! let registry = PaletteRegistry::new();
//! registry.register("draft", Vec::<Rgb>::new()).unwrap();
//!
//! let draft = registry.get("draft").unwrap();
//! assert_eq!(draft.nearest(Rgb::new(1, 2, 3)), Err(PaletteError::EmptyPalette));
//! ```

pub mod color;
pub mod palette;
pub mod quantize;
pub mod registry;


pub use color::{Rgb, MAX_DISTANCE_SQUARED};
pub use palette::{BuiltinPalette, InvalidEntryReason, Palette, PaletteError, ParseColorError};
pub use quantize::{nearest, nearest_index, Quantizer};
pub use registry::{PaletteNames, PaletteRegistry};
