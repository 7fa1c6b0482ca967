// src/tileset.rs

//! Glyph atlas addressing.
//!
//! A `Tileset` describes one atlas texture holding fixed-size tiles laid
//! out 16 columns per row. The display owns two of them: the primary font
//! atlas (glyph codes 0-255) and the extended glyph atlas (codes 256-511).
//! [`GlyphAddress`] performs that range split; it is a documented invariant
//! of the glyph-code space, not a general n-atlas scheme.

use crate::cell::{EXTENDED_GLYPH_BASE, GLYPH_CODE_LIMIT};
use crate::display::driver::TextureId;
use crate::geometry::PixelRect;

/// Tiles per atlas row. Atlas images are authored on this fixed grid.
pub const ATLAS_COLUMNS: u16 = 16;

/// A glyph atlas: one texture plus the tile geometry needed to address it.
#[derive(Debug, Clone, Copy)]
pub struct Tileset {
    pub texture: TextureId,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Number of tiles the atlas actually holds.
    pub count: u16,
}

impl Tileset {
    pub fn new(texture: TextureId, tile_width: u32, tile_height: u32, count: u16) -> Self {
        Tileset {
            texture,
            tile_width,
            tile_height,
            count,
        }
    }

    /// Source rectangle of tile `index` in atlas pixel space.
    ///
    /// Indices past `count` wrap into whatever pixels sit there; atlas
    /// bounds are the tileset author's contract, not checked per draw.
    pub fn source_rect(&self, index: u16) -> PixelRect {
        let col = (index % ATLAS_COLUMNS) as i32;
        let row = (index / ATLAS_COLUMNS) as i32;
        PixelRect::new(
            col * self.tile_width as i32,
            row * self.tile_height as i32,
            self.tile_width,
            self.tile_height,
        )
    }
}

/// Which atlas a glyph code addresses, and the tile index within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphAddress {
    /// Primary font atlas, codes 0-255.
    Primary(u16),
    /// Extended glyph atlas, codes 256-511, rebased to 0.
    Extended(u16),
}

impl GlyphAddress {
    /// Resolves a glyph code to its atlas slot. Codes at or past the end
    /// of the extended range clamp to `'?'` in the primary atlas.
    pub fn of(code: u16) -> GlyphAddress {
        if code >= GLYPH_CODE_LIMIT {
            GlyphAddress::Primary(b'?' as u16)
        } else if code >= EXTENDED_GLYPH_BASE {
            GlyphAddress::Extended(code - EXTENDED_GLYPH_BASE)
        } else {
            GlyphAddress::Primary(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_rect_walks_sixteen_columns() {
        let tiles = Tileset::new(TextureId(7), 8, 8, 256);
        assert_eq!(tiles.source_rect(0), PixelRect::new(0, 0, 8, 8));
        assert_eq!(tiles.source_rect(15), PixelRect::new(120, 0, 8, 8));
        assert_eq!(tiles.source_rect(16), PixelRect::new(0, 8, 8, 8));
        assert_eq!(tiles.source_rect(0xdb), PixelRect::new(88, 104, 8, 8));
    }

    #[test]
    fn glyph_codes_split_at_256() {
        assert_eq!(GlyphAddress::of(0), GlyphAddress::Primary(0));
        assert_eq!(GlyphAddress::of(255), GlyphAddress::Primary(255));
        assert_eq!(GlyphAddress::of(256), GlyphAddress::Extended(0));
        assert_eq!(GlyphAddress::of(511), GlyphAddress::Extended(255));
        assert_eq!(GlyphAddress::of(512), GlyphAddress::Primary(b'?' as u16));
    }
}
