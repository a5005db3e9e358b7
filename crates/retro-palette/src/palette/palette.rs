//! Palette struct and nearest-color matching.
//!
//! This module provides the core `Palette` type: an ordered, immutable list
//! of colors that can be cloned cheaply and shared between the registry and
//! any number of render loops.

use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use super::builtin::BuiltinPalette;
use super::error::PaletteError;
use crate::color::Rgb;

/// An ordered list of quantization target colors.
///
/// Entry order only matters for tie-breaking: when two entries are equally
/// close to a color, the one that comes first wins.
///
/// Unlike a device palette, a `Palette` may be empty. User-defined palettes
/// can be registered before any colors are chosen; matching against an
/// empty palette fails with [`PaletteError::EmptyPalette`].
///
/// # Example
///
/// ```
/// use retro_palette::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
/// assert_eq!(palette.len(), 2);
///
/// let (idx, dist) = palette.find_nearest(Rgb::new(40, 40, 40)).unwrap();
/// assert_eq!(idx, 0);
/// assert_eq!(dist, 3 * 40 * 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Arc<[Rgb]>,
}

impl Palette {
    /// Create a palette from a list of colors. Duplicates are kept.
    pub fn new(colors: &[Rgb]) -> Self {
        Self {
            colors: Arc::from(colors),
        }
    }

    /// Create a palette with no colors.
    pub fn empty() -> Self {
        Self::new(&[])
    }

    /// Create the palette for one of the built-in catalog entries.
    pub fn builtin(builtin: BuiltinPalette) -> Self {
        Self::new(builtin.colors())
    }

    /// Create a palette from loosely typed integer triples.
    ///
    /// Every entry must have exactly three components in 0..=255.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidEntry`] for the first entry that fails
    /// validation.
    ///
    /// # Example
    ///
    /// ```
    /// use retro_palette::{Palette, PaletteError};
    ///
    /// let palette = Palette::from_components(&[vec![0, 0, 0], vec![255, 0, 255]]).unwrap();
    /// assert_eq!(palette.len(), 2);
    ///
    /// let bad = Palette::from_components(&[vec![0, 0, 0], vec![0, 999, 0]]);
    /// assert!(matches!(bad, Err(PaletteError::InvalidEntry { index: 1, .. })));
    /// ```
    pub fn from_components<E: AsRef<[i64]>>(entries: &[E]) -> Result<Self, PaletteError> {
        let colors = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Rgb::from_components(entry.as_ref())
                    .map_err(|reason| PaletteError::InvalidEntry { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(&colors))
    }

    /// Create a palette from hex color strings like "#FF0000" or "#F00".
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ParseColor`] if any hex string is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use retro_palette::{Palette, Rgb};
    ///
    /// let palette = Palette::from_hex(&["#0f380f", "#9bbc0f"]).unwrap();
    /// assert_eq!(palette.get(1), Some(Rgb::new(155, 188, 15)));
    /// ```
    pub fn from_hex(colors: &[&str]) -> Result<Self, PaletteError> {
        let colors = colors
            .iter()
            .map(|s| Rgb::from_str(s).map_err(PaletteError::ParseColor))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(&colors))
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette has no colors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the color at the given index.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<Rgb> {
        self.colors.get(idx).copied()
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Returns true if `color` is one of the palette entries.
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }

    /// Find the nearest palette entry to `color`.
    ///
    /// Returns `(index, squared distance)`. See [`crate::nearest_index`].
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] if the palette has no colors.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> Result<(usize, u32), PaletteError> {
        crate::quantize::nearest_index(color, &self.colors)
    }

    /// Nearest palette color to `color`. See [`crate::nearest`].
    #[inline]
    pub fn nearest(&self, color: Rgb) -> Result<Rgb, PaletteError> {
        crate::quantize::nearest(color, &self.colors)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for Palette {
    type Target = [Rgb];

    fn deref(&self) -> &[Rgb] {
        &self.colors
    }
}

impl AsRef<[Rgb]> for Palette {
    fn as_ref(&self) -> &[Rgb] {
        &self.colors
    }
}

impl From<Vec<Rgb>> for Palette {
    fn from(colors: Vec<Rgb>) -> Self {
        Self {
            colors: Arc::from(colors),
        }
    }
}

impl FromIterator<Rgb> for Palette {
    fn from_iter<I: IntoIterator<Item = Rgb>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgb;
    type IntoIter = std::slice::Iter<'a, Rgb>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}
