// src/surface/dense.rs

//! Array-backed surface covering every cell of its rectangle.

use log::trace;

use crate::cell::Cell;
use crate::color::Color;
use crate::display::{Display, Texture};
use crate::error::Result;
use crate::geometry::{in_bounds, PixelRect};
use crate::surface::{Sprite, Surface};

/// Dense grid surface: one [`Cell`] per position in a flat array, plus an
/// optional sprite overlay.
///
/// Writes are elided when the new cell equals the old one, so unrelated
/// animation elsewhere in a frame does not re-trigger a full-surface
/// render.
pub struct DenseSurface {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    sprites: Vec<Sprite>,
    texture: Texture,
    render_rect: PixelRect,
    cell_width: u32,
    cell_height: u32,
    default_fore: Color,
    default_back: Color,
    dirty: bool,
}

impl DenseSurface {
    /// Creates a `width × height` cell surface with its backing texture
    /// allocated on `display`. Starts dirty, placed at the origin, filled
    /// with empty cells in white on black.
    pub fn new(display: &Display, width: u32, height: u32) -> Result<Self> {
        let cell_width = display.cell_width();
        let cell_height = display.cell_height();
        let texture = display.create_texture(width * cell_width, height * cell_height)?;
        Ok(DenseSurface {
            width,
            height,
            cells: vec![Cell::EMPTY; (width * height) as usize],
            sprites: Vec::new(),
            texture,
            render_rect: PixelRect::new(0, 0, width * cell_width, height * cell_height),
            cell_width,
            cell_height,
            default_fore: Color::WHITE,
            default_back: Color::BLACK,
            dirty: true,
        })
    }

    /// Reads the cell at `(x, y)`, or `None` out of bounds.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        if in_bounds(x, y, self.width, self.height) {
            self.cells.get((x + y * self.width as i32) as usize)
        } else {
            None
        }
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (x + y * self.width as i32) as usize
    }
}

impl Surface for DenseSurface {
    fn kind(&self) -> &'static str {
        "dense"
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn texture(&self) -> &Texture {
        &self.texture
    }

    fn render_rect(&self) -> PixelRect {
        self.render_rect
    }

    fn set_render_position(&mut self, cell_x: i32, cell_y: i32) {
        self.render_rect = PixelRect::new(
            cell_x * self.cell_width as i32,
            cell_y * self.cell_height as i32,
            self.width * self.cell_width,
            self.height * self.cell_height,
        );
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn default_fore(&self) -> Color {
        self.default_fore
    }

    fn default_back(&self) -> Color {
        self.default_back
    }

    fn set_default_fore(&mut self, color: Color) {
        self.default_fore = color;
    }

    fn set_default_back(&mut self, color: Color) {
        self.default_back = color;
    }

    fn clear(&mut self) {
        let empty = Cell::new(b' ' as u16, self.default_fore, self.default_back);
        self.cells.fill(empty);
        self.sprites.clear();
        self.dirty = true;
    }

    fn set_cell(
        &mut self,
        x: i32,
        y: i32,
        glyph: Option<u16>,
        fore: Option<Color>,
        back: Option<Color>,
    ) -> Result<()> {
        if !in_bounds(x, y, self.width, self.height) {
            return Ok(());
        }
        let i = self.index(x, y);
        let merged = self.cells[i].merged(glyph, fore, back);
        // Equal writes don't dirty the surface; this is what keeps a
        // static layer from re-rendering every frame.
        if self.cells[i] != merged {
            self.cells[i] = merged;
            self.dirty = true;
        }
        Ok(())
    }

    fn draw_sprite(&mut self, sprite: Sprite) -> Result<()> {
        self.sprites.push(sprite);
        self.dirty = true;
        Ok(())
    }

    fn render(&mut self, display: &mut Display) {
        if !self.dirty {
            return;
        }
        trace!("DenseSurface: render {}x{}", self.width, self.height);
        display.set_render_target(Some(&self.texture));
        display.clear_target();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = self.cells[self.index(x, y)];
                display.draw_cell_value(x, y, &cell);
            }
        }
        if !self.sprites.is_empty() {
            self.sprites.sort_by_key(|s| s.z_index);
            for sprite in &self.sprites {
                display.draw_sprite(sprite);
            }
        }
        self.dirty = false;
    }
}
