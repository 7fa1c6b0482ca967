// src/surface/sprite.rs

//! Sprite-only surface: no per-cell state at all.

use log::trace;

use crate::color::Color;
use crate::display::{Display, Texture};
use crate::error::{Error, Result};
use crate::geometry::PixelRect;
use crate::surface::{Sprite, Surface};

/// A surface holding only z-ordered sprites. Cell operations fail with
/// [`Error::Unsupported`]; silently dropping them would hide a caller
/// wiring mistake.
pub struct SpriteSurface {
    width: u32,
    height: u32,
    sprites: Vec<Sprite>,
    texture: Texture,
    render_rect: PixelRect,
    cell_width: u32,
    cell_height: u32,
    default_fore: Color,
    default_back: Color,
    dirty: bool,
}

impl SpriteSurface {
    /// Creates a `width × height` cell surface with its backing texture
    /// allocated on `display`. Starts dirty with no sprites.
    pub fn new(display: &Display, width: u32, height: u32) -> Result<Self> {
        let cell_width = display.cell_width();
        let cell_height = display.cell_height();
        let texture = display.create_texture(width * cell_width, height * cell_height)?;
        Ok(SpriteSurface {
            width,
            height,
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

    /// Number of queued sprites.
    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }
}

impl Surface for SpriteSurface {
    fn kind(&self) -> &'static str {
        "sprite"
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
        self.sprites.clear();
        self.dirty = true;
    }

    fn set_cell(
        &mut self,
        _x: i32,
        _y: i32,
        _glyph: Option<u16>,
        _fore: Option<Color>,
        _back: Option<Color>,
    ) -> Result<()> {
        Err(Error::Unsupported {
            surface: self.kind(),
            operation: "cell drawing",
        })
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
        trace!("SpriteSurface: render {} sprites", self.sprites.len());
        display.set_render_target(Some(&self.texture));
        display.clear_target();
        if !self.sprites.is_empty() {
            self.sprites.sort_by_key(|s| s.z_index);
            for sprite in &self.sprites {
                display.draw_sprite(sprite);
            }
        }
        self.dirty = false;
    }
}
