// src/color.rs

//! Defines color representations (`Rgb`, `Color`) and the indexed `Palette`.
//!
//! Cells carry a `Color`, which is either a concrete RGB triple or a byte
//! index into a palette. Indexed colors are resolved to RGB by the
//! `Display` at draw time, so repainting a whole scene in a new mood is a
//! palette swap rather than a surface rewrite.

use std::collections::HashMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A concrete RGB triple, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Unpacks a `0xRRGGBB` integer, the palette file encoding.
    pub const fn from_u32(val: u32) -> Self {
        Rgb {
            r: ((val >> 16) & 0xff) as u8,
            g: ((val >> 8) & 0xff) as u8,
            b: (val & 0xff) as u8,
        }
    }

    /// Packs this color back into a `0xRRGGBB` integer.
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// A color value as stored in a cell: a concrete RGB triple or a byte
/// index into a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// An RGB true color, each component 0-255.
    Rgb(u8, u8, u8),
    /// An indexed color resolved through the active palette at draw time.
    Indexed(u8),
}

impl Color {
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);

    /// Resolves this color to a concrete RGB triple using `palette` for
    /// indexed values.
    pub fn resolve(self, palette: &Palette) -> Rgb {
        match self {
            Color::Rgb(r, g, b) => Rgb::new(r, g, b),
            Color::Indexed(idx) => palette.color_at(idx),
        }
    }
}

impl Default for Color {
    /// White, matching the default foreground of a fresh surface.
    fn default() -> Self {
        Color::WHITE
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Number of slots in a palette. Indexed colors are a single byte.
pub const PALETTE_SIZE: usize = 256;

/// An indexed color table: a fixed 256-slot array of RGB triples plus a
/// mapping from symbolic key to slot index.
///
/// Index assignment is append-only and stable for the process lifetime.
/// There is deliberately no removal or reassignment API; surfaces cache
/// `Color::Indexed` values, and reusing an index would silently recolor
/// them.
///
/// Slot 0 is black and slot 1 is white by convention, pre-registered under
/// the keys `"black"` and `"white"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "PaletteFile", into = "PaletteFile")]
pub struct Palette {
    colors: [Rgb; PALETTE_SIZE],
    indices: HashMap<String, u8>,
}

impl Palette {
    /// Creates a palette with the two conventional defaults registered.
    pub fn new() -> Self {
        let mut palette = Palette {
            colors: [Rgb::BLACK; PALETTE_SIZE],
            indices: HashMap::new(),
        };
        // Slots 0 and 1 are load-bearing: reset_colors on a surface and
        // Cell::EMPTY assume black-then-white registration order.
        palette
            .add("black", Rgb::BLACK)
            .expect("empty palette accepts black");
        palette
            .add("white", Rgb::WHITE)
            .expect("empty palette accepts white");
        palette
    }

    /// Number of registered colors.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Registers `color` under `key` at the next free slot and returns the
    /// assigned index.
    ///
    /// Fails if the key is already registered or all 256 slots are taken.
    pub fn add(&mut self, key: &str, color: Rgb) -> Result<u8> {
        if self.indices.contains_key(key) {
            return Err(Error::DuplicatePaletteKey(key.to_string()));
        }
        let next = self.indices.len();
        if next >= PALETTE_SIZE {
            return Err(Error::PaletteFull);
        }
        let index = next as u8;
        self.colors[next] = color;
        self.indices.insert(key.to_string(), index);
        Ok(index)
    }

    /// Looks up the slot index registered for `key`.
    pub fn index_of(&self, key: &str) -> Option<u8> {
        self.indices.get(key).copied()
    }

    /// Returns the RGB triple at `index`. Unregistered slots read as the
    /// black they were initialized to.
    pub fn color_at(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    /// Convenience: the `Color::Indexed` value registered for `key`, or a
    /// warning and white if the key is unknown.
    pub fn color(&self, key: &str) -> Color {
        match self.index_of(key) {
            Some(idx) => Color::Indexed(idx),
            None => {
                warn!("Palette: unknown color key {:?}, using white", key);
                Color::WHITE
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new()
    }
}

/// On-disk palette representation: packed `0xRRGGBB` integers plus the
/// key-to-index map.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PaletteFile {
    colors: Vec<u32>,
    indices: HashMap<String, u8>,
}

impl From<PaletteFile> for Palette {
    fn from(file: PaletteFile) -> Self {
        let mut colors = [Rgb::BLACK; PALETTE_SIZE];
        if file.colors.len() > PALETTE_SIZE {
            warn!(
                "Palette file defines {} colors; truncating to {}",
                file.colors.len(),
                PALETTE_SIZE
            );
        }
        for (slot, packed) in colors.iter_mut().zip(file.colors.iter()) {
            *slot = Rgb::from_u32(*packed);
        }
        Palette {
            colors,
            indices: file.indices,
        }
    }
}

impl From<Palette> for PaletteFile {
    fn from(palette: Palette) -> Self {
        let used = palette.indices.len();
        PaletteFile {
            colors: palette.colors[..used].iter().map(|c| c.to_u32()).collect(),
            indices: palette.indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_indices_are_append_only() {
        let mut palette = Palette::new();
        assert_eq!(palette.index_of("black"), Some(0));
        assert_eq!(palette.index_of("white"), Some(1));

        let rust = palette.add("rust", Rgb::new(183, 65, 14)).unwrap();
        let moss = palette.add("moss", Rgb::new(90, 110, 60)).unwrap();
        assert_eq!(rust, 2);
        assert_eq!(moss, 3);

        // A duplicate key must not disturb the index already handed out.
        assert!(palette.add("rust", Rgb::WHITE).is_err());
        assert_eq!(palette.index_of("rust"), Some(2));
        assert_eq!(palette.color_at(2), Rgb::new(183, 65, 14));
    }

    #[test]
    fn indexed_color_resolves_through_palette() {
        let mut palette = Palette::new();
        let blood = palette.add("blood", Rgb::new(160, 0, 0)).unwrap();
        assert_eq!(Color::Indexed(blood).resolve(&palette), Rgb::new(160, 0, 0));
        assert_eq!(Color::Rgb(1, 2, 3).resolve(&palette), Rgb::new(1, 2, 3));
    }

    #[test]
    fn palette_round_trips_through_json() {
        let mut palette = Palette::new();
        palette.add("sand", Rgb::new(194, 178, 128)).unwrap();

        let json = serde_json::to_string(&palette).unwrap();
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back.index_of("sand"), Some(2));
        assert_eq!(back.color_at(2), Rgb::new(194, 178, 128));
    }
}
