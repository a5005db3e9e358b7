//! Built-in palette catalog.
//!
//! These colors are part of the public contract and must stay byte-for-byte
//! identical, since saved settings refer to palettes by name.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgb;

const GRAYSCALE: [Rgb; 5] = [
    Rgb::new(0, 0, 0),
    Rgb::new(64, 64, 64),
    Rgb::new(128, 128, 128),
    Rgb::new(192, 192, 192),
    Rgb::new(255, 255, 255),
];

const RETRO: [Rgb; 5] = [
    Rgb::new(0, 0, 0),
    Rgb::new(87, 51, 74),
    Rgb::new(188, 74, 60),
    Rgb::new(255, 163, 0),
    Rgb::new(255, 236, 39),
];

const GAMEBOY: [Rgb; 4] = [
    Rgb::new(15, 56, 15),
    Rgb::new(48, 98, 48),
    Rgb::new(139, 172, 15),
    Rgb::new(155, 188, 15),
];

const CYBERPUNK: [Rgb; 5] = [
    Rgb::new(0, 0, 0),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 0, 128),
    Rgb::new(255, 255, 0),
];

const PASTEL: [Rgb; 5] = [
    Rgb::new(255, 179, 186),
    Rgb::new(255, 223, 186),
    Rgb::new(255, 255, 186),
    Rgb::new(186, 255, 201),
    Rgb::new(186, 225, 255),
];

/// One of the compiled-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinPalette {
    /// Five evenly spaced greys
    Grayscale,
    /// Warm 8-bit console tones
    Retro,
    /// The four greens of the original handheld screen
    Gameboy,
    /// Black plus neon magenta, cyan, pink and yellow
    Cyberpunk,
    /// Soft pinks, yellows, greens and blues
    Pastel,
}

impl BuiltinPalette {
    /// Every built-in palette, in declaration order.
    pub const ALL: [BuiltinPalette; 5] = [
        BuiltinPalette::Grayscale,
        BuiltinPalette::Retro,
        BuiltinPalette::Gameboy,
        BuiltinPalette::Cyberpunk,
        BuiltinPalette::Pastel,
    ];

    /// The registry name of this palette.
    pub const fn name(self) -> &'static str {
        match self {
            BuiltinPalette::Grayscale => "grayscale",
            BuiltinPalette::Retro => "retro",
            BuiltinPalette::Gameboy => "gameboy",
            BuiltinPalette::Cyberpunk => "cyberpunk",
            BuiltinPalette::Pastel => "pastel",
        }
    }

    /// The palette colors, in their canonical order.
    pub const fn colors(self) -> &'static [Rgb] {
        match self {
            BuiltinPalette::Grayscale => &GRAYSCALE,
            BuiltinPalette::Retro => &RETRO,
            BuiltinPalette::Gameboy => &GAMEBOY,
            BuiltinPalette::Cyberpunk => &CYBERPUNK,
            BuiltinPalette::Pastel => &PASTEL,
        }
    }

    /// Look up a built-in by exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl fmt::Display for BuiltinPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinPalette {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| PaletteError::UnknownPalette {
            name: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_bytes() {
        let bytes = |b: BuiltinPalette| b.colors().iter().map(|c| c.to_bytes()).collect::<Vec<_>>();

        assert_eq!(
            bytes(BuiltinPalette::Grayscale),
            vec![[0, 0, 0], [64, 64, 64], [128, 128, 128], [192, 192, 192], [255, 255, 255]]
        );
        assert_eq!(
            bytes(BuiltinPalette::Retro),
            vec![[0, 0, 0], [87, 51, 74], [188, 74, 60], [255, 163, 0], [255, 236, 39]]
        );
        assert_eq!(
            bytes(BuiltinPalette::Gameboy),
            vec![[15, 56, 15], [48, 98, 48], [139, 172, 15], [155, 188, 15]]
        );
        assert_eq!(
            bytes(BuiltinPalette::Cyberpunk),
            vec![[0, 0, 0], [255, 0, 255], [0, 255, 255], [255, 0, 128], [255, 255, 0]]
        );
        assert_eq!(
            bytes(BuiltinPalette::Pastel),
            vec![
                [255, 179, 186],
                [255, 223, 186],
                [255, 255, 186],
                [186, 255, 201],
                [186, 225, 255]
            ]
        );
    }

    #[test]
    fn test_declaration_order() {
        let names: Vec<_> = BuiltinPalette::ALL.iter().map(|b| b.name()).collect();
        assert_eq!(names, ["grayscale", "retro", "gameboy", "cyberpunk", "pastel"]);
    }

    #[test]
    fn test_from_name_round_trip() {
        for builtin in BuiltinPalette::ALL {
            assert_eq!(BuiltinPalette::from_name(builtin.name()), Some(builtin));
            assert_eq!(builtin.to_string().parse::<BuiltinPalette>(), Ok(builtin));
        }
    }

    #[test]
    fn test_from_name_is_case_sensitive() {
        assert_eq!(BuiltinPalette::from_name("GameBoy"), None);
        assert!(matches!(
            "none".parse::<BuiltinPalette>(),
            Err(PaletteError::UnknownPalette { .. })
        ));
    }
}
