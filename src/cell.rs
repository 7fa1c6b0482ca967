// src/cell.rs

//! Defines the `Cell` value type and the glyph-code space.
//!
//! A `Cell` is one grid position's glyph plus its foreground and
//! background colors. Cells are immutable values: a surface write replaces
//! the whole cell, with unspecified fields carried over from the previous
//! value by [`Cell::merged`]. Equality is structural and is what the dense
//! surface uses to elide redundant writes.
//!
//! Glyphs are stored as `u16` codes rather than `char`s. Codes 0-255
//! address the primary font atlas in CP437 order; codes 256-511 address
//! the secondary "extended glyph" atlas. Text-oriented callers go through
//! [`glyph_from_char`], which maps a Unicode `char` onto its CP437 slot.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::color::Color;

/// First glyph code addressed to the extended atlas.
pub const EXTENDED_GLYPH_BASE: u16 = 256;
/// One past the last valid glyph code.
pub const GLYPH_CODE_LIMIT: u16 = 512;

/// One grid position's glyph and color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Glyph code; see the module docs for the two-atlas code space.
    pub glyph: u16,
    pub fore: Color,
    pub back: Color,
}

impl Cell {
    /// A space in white on black, the content of a freshly cleared cell.
    pub const EMPTY: Cell = Cell {
        glyph: b' ' as u16,
        fore: Color::WHITE,
        back: Color::BLACK,
    };

    pub const fn new(glyph: u16, fore: Color, back: Color) -> Self {
        Cell { glyph, fore, back }
    }

    /// Builds the replacement value for a partial write: fields given as
    /// `Some` are taken from the write, the rest from `self`.
    pub fn merged(&self, glyph: Option<u16>, fore: Option<Color>, back: Option<Color>) -> Cell {
        Cell {
            glyph: glyph.unwrap_or(self.glyph),
            fore: fore.unwrap_or(self.fore),
            back: back.unwrap_or(self.back),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// The code page 437 glyph table, one `char` per atlas slot.
///
/// Slot order matches the classic IBM PC character ROM, which is also the
/// layout of the 16x16 font atlas. ASCII occupies 0x20-0x7E unchanged.
#[rustfmt::skip]
const CP437: [char; 256] = [
    ' ', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
    ' ', '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';', '<', '=', '>', '?',
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O',
    'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
    '`', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o',
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '{', '|', '}', '~', '⌂',
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

static CP437_REVERSE: Lazy<HashMap<char, u16>> = Lazy::new(|| {
    let mut map = HashMap::with_capacity(CP437.len());
    for (code, &ch) in CP437.iter().enumerate() {
        // First occurrence wins; ' ' appears at both 0x00 and 0x20 and
        // must map to the printable slot.
        map.entry(ch).or_insert(code as u16);
    }
    map.insert(' ', 0x20);
    map
});

/// Maps a `char` onto its primary-atlas glyph code.
///
/// Characters outside code page 437 render as `'?'` rather than erroring;
/// text printing is best-effort by design.
pub fn glyph_from_char(ch: char) -> u16 {
    if ch.is_ascii_graphic() || ch == ' ' {
        return ch as u16;
    }
    CP437_REVERSE.get(&ch).copied().unwrap_or(b'?' as u16)
}
