//! Color type
//!
//! All palette matching happens on 8-bit RGB triples.
//!
//! # Example
//!
//! ```
//! use retro_palette::Rgb;
//!
//! let pixel: Rgb = "#57334a".parse().unwrap();
//! assert_eq!(pixel, Rgb::new(87, 51, 74));
//! ```

mod rgb;

pub use rgb::{Rgb, MAX_DISTANCE_SQUARED};
