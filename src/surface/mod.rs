// src/surface/mod.rs

//! The `Surface` capability contract and its three implementations.
//!
//! A surface is a drawable canvas with its own backing texture, dirty
//! flag, and placement rectangle on the compositor output. The trait
//! exposes the full operation set - cell mutation, clearing, sprite
//! drawing, rendering - and variants that do not support an operation
//! fail fast with [`Error::Unsupported`] instead of silently dropping the
//! call. This keeps call sites uniform (`&mut dyn Surface`) without an
//! inheritance split between cell-bearing and sprite-bearing canvases.
//!
//! All the derived drawing helpers (rectangles, lines, frames, text) are
//! default trait methods expressed purely in terms of `set_cell`.

use crate::cell::glyph_from_char;
use crate::color::Color;
use crate::display::{Display, Texture, TextureInfo};
use crate::error::{Error, Result};
use crate::geometry::PixelRect;

mod dense;
mod sparse;
mod sprite;

pub use dense::DenseSurface;
pub use sparse::SparseSurface;
pub use sprite::SpriteSurface;

/// A free-form overlay draw command: a texture blitted at a pixel
/// position, above all cell content of its surface.
///
/// `z_index` is a sort key only; sprites with equal keys keep their
/// insertion order (stable sort).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub x: i32,
    pub y: i32,
    pub z_index: i32,
    pub texture: TextureInfo,
}

impl Sprite {
    pub fn new(x: i32, y: i32, texture: TextureInfo) -> Self {
        Sprite {
            x,
            y,
            z_index: 0,
            texture,
        }
    }

    pub fn with_z(x: i32, y: i32, z_index: i32, texture: TextureInfo) -> Self {
        Sprite {
            x,
            y,
            z_index,
            texture,
        }
    }
}

/// Horizontal anchoring for text printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlignment {
    fn offset(self, len: usize) -> i32 {
        match self {
            TextAlignment::Left => 0,
            TextAlignment::Center => -(len as i32) / 2,
            TextAlignment::Right => -(len as i32),
        }
    }
}

/// One character of pre-colored text; `None` means the printing surface's
/// default foreground. Produced by the text formatting layer, consumed by
/// [`Surface::print_colored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColoredChar {
    pub ch: char,
    pub color: Option<Color>,
}

/// The capability contract shared by every drawable canvas.
pub trait Surface {
    /// Variant name used in `Unsupported` errors.
    fn kind(&self) -> &'static str;

    /// Logical width in cells.
    fn width(&self) -> u32;

    /// Logical height in cells.
    fn height(&self) -> u32;

    /// The surface's backing texture.
    fn texture(&self) -> &Texture;

    /// Pixel rectangle this surface occupies when blitted onto the
    /// compositor output.
    fn render_rect(&self) -> PixelRect;

    /// Places the surface at cell coordinates on the output.
    fn set_render_position(&mut self, cell_x: i32, cell_y: i32);

    /// True while the surface has unrendered changes. Starts true at
    /// construction, cleared only by a successful `render`.
    fn is_dirty(&self) -> bool;

    fn default_fore(&self) -> Color;
    fn default_back(&self) -> Color;
    fn set_default_fore(&mut self, color: Color);
    fn set_default_back(&mut self, color: Color);

    /// Restores the default color pair to white on black.
    fn reset_colors(&mut self) {
        self.set_default_fore(Color::WHITE);
        self.set_default_back(Color::BLACK);
    }

    /// Clears the surface's content. Grid variants revert cells; sprite
    /// lists are emptied.
    fn clear(&mut self);

    /// Writes one cell. Any of the three fields may be `None`, leaving
    /// that field at its prior value (or the surface default where no
    /// prior value exists).
    ///
    /// Out-of-bounds coordinates are silently ignored on grid surfaces -
    /// drawing past a viewport edge is routine and must not abort a
    /// frame. Sprite-only surfaces return [`Error::Unsupported`].
    fn set_cell(
        &mut self,
        x: i32,
        y: i32,
        glyph: Option<u16>,
        fore: Option<Color>,
        back: Option<Color>,
    ) -> Result<()>;

    /// Queues a sprite for drawing above this surface's cell content.
    /// Variants without sprite support fail with [`Error::Unsupported`].
    fn draw_sprite(&mut self, sprite: Sprite) -> Result<()> {
        let _ = sprite;
        Err(Error::Unsupported {
            surface: self.kind(),
            operation: "sprite drawing",
        })
    }

    /// Renders this surface onto its backing texture via `display`.
    ///
    /// Idempotent while clean. When dirty: the backing texture becomes
    /// the render target, is cleared, cells are drawn, then sprites in
    /// stable ascending z-order - cells first, sprites on top - and the
    /// dirty flag is cleared.
    fn render(&mut self, display: &mut Display);

    // --- Derived drawing helpers, all in terms of set_cell ---

    /// Writes `ch` with the surface's default color pair.
    fn put_char(&mut self, x: i32, y: i32, ch: char) -> Result<()> {
        let fore = self.default_fore();
        let back = self.default_back();
        self.set_cell(x, y, Some(glyph_from_char(ch)), Some(fore), Some(back))
    }

    /// Writes `ch` leaving the cell's colors untouched.
    fn set_char(&mut self, x: i32, y: i32, ch: char) -> Result<()> {
        self.set_cell(x, y, Some(glyph_from_char(ch)), None, None)
    }

    /// Recolors a cell's foreground, leaving glyph and background.
    fn set_char_fore(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        self.set_cell(x, y, None, Some(color), None)
    }

    /// Recolors a cell's background, leaving glyph and foreground.
    fn set_char_back(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        self.set_cell(x, y, None, None, Some(color))
    }

    /// Fills a cell rectangle with one glyph and color pair.
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        ch: char,
        fore: Color,
        back: Color,
    ) -> Result<()> {
        let glyph = glyph_from_char(ch);
        for iy in y..y + height as i32 {
            for ix in x..x + width as i32 {
                self.set_cell(ix, iy, Some(glyph), Some(fore), Some(back))?;
            }
        }
        Ok(())
    }

    /// Horizontal run of `ch`. `back` of `None` leaves backgrounds as
    /// they are.
    fn line_horiz(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        ch: char,
        fore: Color,
        back: Option<Color>,
    ) -> Result<()> {
        let glyph = glyph_from_char(ch);
        for i in 0..len as i32 {
            self.set_cell(x + i, y, Some(glyph), Some(fore), back)?;
        }
        Ok(())
    }

    /// Vertical run of `ch`. `back` of `None` leaves backgrounds as they
    /// are.
    fn line_vert(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        ch: char,
        fore: Color,
        back: Option<Color>,
    ) -> Result<()> {
        let glyph = glyph_from_char(ch);
        for i in 0..len as i32 {
            self.set_cell(x, y + i, Some(glyph), Some(fore), back)?;
        }
        Ok(())
    }

    /// Draws a double-line box frame in the default colors, optionally
    /// clearing the interior to spaces.
    fn print_frame(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        clear_interior: bool,
    ) -> Result<()> {
        let fore = self.default_fore();
        let back = self.default_back();
        let w = width as i32;
        let h = height as i32;

        self.line_horiz(x, y, width.saturating_sub(1), '═', fore, Some(back))?;
        self.line_horiz(x, y + h - 1, width.saturating_sub(1), '═', fore, Some(back))?;
        self.line_vert(x, y, height.saturating_sub(1), '║', fore, Some(back))?;
        self.line_vert(x + w - 1, y, height.saturating_sub(1), '║', fore, Some(back))?;

        self.put_char(x, y, '╔')?;
        self.put_char(x + w - 1, y, '╗')?;
        self.put_char(x, y + h - 1, '╚')?;
        self.put_char(x + w - 1, y + h - 1, '╝')?;

        if clear_interior {
            self.fill_rect(
                x + 1,
                y + 1,
                width.saturating_sub(2),
                height.saturating_sub(2),
                ' ',
                fore,
                back,
            )?;
        }
        Ok(())
    }

    /// Prints `text` anchored at `(x, y)` per `alignment`. `back` of
    /// `None` leaves backgrounds as they are.
    fn print(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        fore: Color,
        back: Option<Color>,
        alignment: TextAlignment,
    ) -> Result<()> {
        let offset = alignment.offset(text.chars().count());
        for (i, ch) in text.chars().enumerate() {
            self.set_cell(
                x + i as i32 + offset,
                y,
                Some(glyph_from_char(ch)),
                Some(fore),
                back,
            )?;
        }
        Ok(())
    }

    /// Prints pre-colored text; characters without an explicit color use
    /// the surface's default foreground.
    fn print_colored(
        &mut self,
        x: i32,
        y: i32,
        text: &[ColoredChar],
        back: Option<Color>,
        alignment: TextAlignment,
    ) -> Result<()> {
        let offset = alignment.offset(text.len());
        let default_fore = self.default_fore();
        for (i, colored) in text.iter().enumerate() {
            self.set_cell(
                x + i as i32 + offset,
                y,
                Some(glyph_from_char(colored.ch)),
                Some(colored.color.unwrap_or(default_fore)),
                back,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
