// src/surface/sparse.rs

//! Mapping-backed surface holding only explicitly-touched cells.

use log::trace;
use std::collections::HashMap;

use crate::cell::Cell;
use crate::color::Color;
use crate::display::{Display, Texture};
use crate::error::Result;
use crate::geometry::{in_bounds, CellCoords, PixelRect};
use crate::surface::Surface;

/// Sparse grid surface: cells live in a map keyed by position; absent
/// positions are untouched (transparent once blitted, since the backing
/// texture is cleared to transparent black each render).
///
/// Cheaper than a dense surface when most of the grid stays empty, e.g. a
/// cursor highlight or scattered particles. Writes always mark the
/// surface dirty; a lookup-then-compare is not assumed worth the cost
/// here.
pub struct SparseSurface {
    width: u32,
    height: u32,
    cells: HashMap<CellCoords, Cell>,
    texture: Texture,
    render_rect: PixelRect,
    cell_width: u32,
    cell_height: u32,
    default_fore: Color,
    default_back: Color,
    dirty: bool,
}

impl SparseSurface {
    /// Creates a `width × height` cell surface with its backing texture
    /// allocated on `display`. Starts dirty and empty.
    pub fn new(display: &Display, width: u32, height: u32) -> Result<Self> {
        let cell_width = display.cell_width();
        let cell_height = display.cell_height();
        let texture = display.create_texture(width * cell_width, height * cell_height)?;
        Ok(SparseSurface {
            width,
            height,
            cells: HashMap::new(),
            texture,
            render_rect: PixelRect::new(0, 0, width * cell_width, height * cell_height),
            cell_width,
            cell_height,
            default_fore: Color::WHITE,
            default_back: Color::BLACK,
            dirty: true,
        })
    }

    /// Number of touched cells.
    pub fn populated(&self) -> usize {
        self.cells.len()
    }

    /// Reads the touched cell at `(x, y)`, if any.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cells.get(&CellCoords::new(x, y))
    }
}

impl Surface for SparseSurface {
    fn kind(&self) -> &'static str {
        "sparse"
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

    /// Empties the map entirely: the surface reverts to fully untouched,
    /// not to filled-with-default.
    fn clear(&mut self) {
        self.cells.clear();
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
        let pos = CellCoords::new(x, y);
        let base = self.cells.get(&pos).copied().unwrap_or(Cell::new(
            b' ' as u16,
            self.default_fore,
            self.default_back,
        ));
        self.cells.insert(pos, base.merged(glyph, fore, back));
        self.dirty = true;
        Ok(())
    }

    fn render(&mut self, display: &mut Display) {
        if !self.dirty {
            return;
        }
        trace!("SparseSurface: render {} cells", self.cells.len());
        display.set_render_target(Some(&self.texture));
        display.clear_target();
        for (pos, cell) in &self.cells {
            display.draw_cell_value(pos.x, pos.y, cell);
        }
        self.dirty = false;
    }
}
