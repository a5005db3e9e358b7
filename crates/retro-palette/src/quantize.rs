//! Nearest-color quantization.
//!
//! Matching is a linear scan over the palette with squared RGB distance.
//! Palettes hold at most a few dozen entries, so a scan beats any spatial
//! index and keeps the inner loop free of allocation.

use crate::color::Rgb;
use crate::palette::{Palette, PaletteError};

/// Find the index of the palette entry nearest to `color`.
///
/// Returns `(index, squared distance)`. Among equally distant entries the
/// earliest one wins, so results are reproducible for identical inputs.
///
/// # Errors
///
/// Returns [`PaletteError::EmptyPalette`] if `palette` has no entries.
///
/// # Example
///
/// ```
/// use retro_palette::{nearest_index, Rgb};
///
/// let palette = [Rgb::new(0, 0, 0), Rgb::new(20, 20, 20)];
/// // Equidistant: the first entry wins
/// assert_eq!(nearest_index(Rgb::new(10, 10, 10), &palette), Ok((0, 300)));
/// ```
#[inline]
pub fn nearest_index(color: Rgb, palette: &[Rgb]) -> Result<(usize, u32), PaletteError> {
    let (first, rest) = palette.split_first().ok_or(PaletteError::EmptyPalette)?;

    let mut best_idx = 0;
    let mut best_dist = color.distance_squared(*first);

    for (i, &candidate) in rest.iter().enumerate() {
        let dist = color.distance_squared(candidate);
        // Strict comparison keeps the earlier entry on ties
        if dist < best_dist {
            best_dist = dist;
            best_idx = i + 1;
        }
    }

    Ok((best_idx, best_dist))
}

/// Return the palette color nearest to `color` under Euclidean RGB distance.
///
/// The result is always one of the palette entries, by value.
///
/// # Errors
///
/// Returns [`PaletteError::EmptyPalette`] if `palette` has no entries.
///
/// # Example
///
/// ```
/// use retro_palette::{nearest, BuiltinPalette, Rgb};
///
/// let gameboy = BuiltinPalette::Gameboy.colors();
/// assert_eq!(nearest(Rgb::new(10, 10, 10), gameboy), Ok(Rgb::new(15, 56, 15)));
/// ```
#[inline]
pub fn nearest(color: Rgb, palette: &[Rgb]) -> Result<Rgb, PaletteError> {
    let (idx, _) = nearest_index(color, palette)?;
    Ok(palette[idx])
}

/// A palette that is known to be non-empty.
///
/// Checking emptiness once at construction lets [`Quantizer::map`] be
/// infallible, which is what a per-pixel render loop wants.
///
/// # Example
///
/// ```
/// use retro_palette::{BuiltinPalette, Palette, Quantizer, Rgb};
///
/// let quantizer = Quantizer::new(Palette::builtin(BuiltinPalette::Retro)).unwrap();
/// assert_eq!(quantizer.map(Rgb::new(255, 255, 255)), Rgb::new(255, 236, 39));
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    palette: Palette,
}

impl Quantizer {
    /// Wrap `palette` for repeated matching.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if `palette` has no entries.
    pub fn new(palette: Palette) -> Result<Self, PaletteError> {
        if palette.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { palette })
    }

    /// The palette being matched against.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Nearest palette color to `color`.
    #[inline]
    pub fn map(&self, color: Rgb) -> Rgb {
        self.palette[self.map_index(color)]
    }

    /// Index of the nearest palette color to `color`.
    #[inline]
    pub fn map_index(&self, color: Rgb) -> usize {
        // Non-empty by construction
        nearest_index(color, &self.palette).map_or(0, |(idx, _)| idx)
    }

    /// Map every pixel of `pixels` in place.
    pub fn map_in_place(&self, pixels: &mut [Rgb]) {
        for pixel in pixels {
            *pixel = self.map(*pixel);
        }
    }
}

impl TryFrom<Palette> for Quantizer {
    type Error = PaletteError;

    fn try_from(palette: Palette) -> Result<Self, Self::Error> {
        Self::new(palette)
    }
}
