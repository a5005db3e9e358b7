//! 8-bit RGB color type
//!
//! Pixel filters work directly on 8-bit channels, so distance math stays in
//! integers and never leaves plain RGB.

use std::fmt;
use std::str::FromStr;

use crate::palette::{InvalidEntryReason, ParseColorError};

/// Largest possible squared distance between two colors: `3 * 255^2`.
pub const MAX_DISTANCE_SQUARED: u32 = 3 * 255 * 255;

/// A color with 8-bit red, green and blue channels.
///
/// Plain value type: two colors are the same color exactly when their three
/// channels are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a color from its three channels.
    ///
    /// # Example
    /// ```
    /// use retro_palette::Rgb;
    /// let orange = Rgb::new(255, 163, 0);
    /// assert_eq!(orange.g, 163);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Build a color from loosely typed integer components.
    ///
    /// Used for palette data that arrives from outside the type system
    /// (settings files, user input). Exactly three components in 0..=255
    /// are accepted.
    ///
    /// # Example
    /// ```
    /// use retro_palette::{InvalidEntryReason, Rgb};
    ///
    /// assert_eq!(Rgb::from_components(&[15, 56, 15]), Ok(Rgb::new(15, 56, 15)));
    /// assert_eq!(
    ///     Rgb::from_components(&[0, 0]),
    ///     Err(InvalidEntryReason::WrongArity(2))
    /// );
    /// ```
    pub fn from_components(components: &[i64]) -> Result<Self, InvalidEntryReason> {
        let [r, g, b] = components else {
            return Err(InvalidEntryReason::WrongArity(components.len()));
        };
        let channel = |v: i64| u8::try_from(v).map_err(|_| InvalidEntryReason::OutOfRange(v));
        Ok(Self::new(channel(*r)?, channel(*g)?, channel(*b)?))
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Ordering by squared distance is the same as ordering by distance, and
    /// the value always fits in a `u32` (at most [`MAX_DISTANCE_SQUARED`]).
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r.abs_diff(other.r) as u32;
        let dg = self.g.abs_diff(other.g) as u32;
        let db = self.b.abs_diff(other.b) as u32;
        dr * dr + dg * dg + db * db
    }

    /// Euclidean distance in RGB space.
    #[inline]
    pub fn distance(self, other: Rgb) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}

impl fmt::Display for Rgb {
    /// Formats as lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use retro_palette::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::new(255, 255, 255));
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let digits = s
            .chars()
            .map(|c| match c.to_digit(16) {
                Some(d) => Ok(d as u8),
                None => Err(ParseColorError::InvalidHex(c)),
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match digits[..] {
            // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self::new(
                (r1 << 4) | r2,
                (g1 << 4) | g2,
                (b1 << 4) | b2,
            )),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
