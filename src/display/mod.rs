// src/display/mod.rs

//! The `Display` adapter: owns the backend driver, the shared output
//! texture, and the two glyph atlases, and turns cell/sprite draws into
//! driver primitives.
//!
//! Per frame the compositor drives it in a fixed order: surfaces render
//! onto their own textures, `blit` copies each rendered texture onto the
//! root output, and `flush` presents the root to the screen - once, and
//! only if at least one blit happened since the previous flush.

use anyhow::Context;
use log::{info, trace};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::cell::Cell;
use crate::color::{Color, Palette, Rgb};
use crate::config::DisplayConfig;
use crate::error::Result;
use crate::geometry::{CellRect, PixelRect};
use crate::surface::Surface;
use crate::tileset::{GlyphAddress, Tileset};

pub mod driver;
pub mod drivers;

pub use driver::{DisplayDriver, TextureId, TextureInfo};

/// Shared handle to the single-threaded backend driver.
pub type SharedDriver = Rc<RefCell<dyn DisplayDriver>>;

/// An owned GPU texture, released on drop.
///
/// Each surface holds exactly one of these for its backing store; the
/// display holds one for the root output and one per atlas. Textures are
/// never shared between two owners, so release is unconditional.
pub struct Texture {
    id: TextureId,
    driver: SharedDriver,
}

impl Texture {
    pub fn id(&self) -> TextureId {
        self.id
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.driver.borrow_mut().destroy_texture(self.id);
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Texture").field(&self.id).finish()
    }
}

/// Rendering backend adapter over a [`DisplayDriver`].
pub struct Display {
    driver: SharedDriver,
    root: Texture,
    // Atlas textures are owned here; the tilesets carry bare ids.
    _font_texture: Texture,
    _glyph_texture: Texture,
    font: Tileset,
    glyphs: Tileset,
    palette: Palette,
    /// Viewport size in cells.
    width: u32,
    height: u32,
    /// Cell size in output pixels (tile size times the pixel multiplier).
    cell_width: u32,
    cell_height: u32,
    terminal_mode: bool,
    /// Set by `blit`/`clear_region`, consumed by `flush`.
    unflushed: bool,
}

impl Display {
    /// Creates the backend driver `D` (opening its window per `config`)
    /// and builds a display on top of it.
    pub fn open<D: DisplayDriver + 'static>(config: &DisplayConfig) -> Result<Self> {
        let driver = D::new(config).context("creating display driver")?;
        Self::with_driver(Rc::new(RefCell::new(driver)), config)
    }

    /// Builds a display over an already-constructed driver. This is the
    /// seam tests and embedders use to supply their own backend instance.
    pub fn with_driver(driver: SharedDriver, config: &DisplayConfig) -> Result<Self> {
        info!(
            "Display: {}x{} cells at {}x{} px/cell",
            config.grid.columns,
            config.grid.rows,
            config.cell_width(),
            config.cell_height()
        );

        let tiles = &config.tileset;

        // Each id goes into its owning Texture the moment the driver
        // hands it back, so a failure in a later construction step still
        // releases everything allocated so far.
        let font_info = driver
            .borrow_mut()
            .load_texture(&tiles.font_path)
            .context("loading font atlas")?;
        let font_texture = Texture {
            id: font_info.id,
            driver: Rc::clone(&driver),
        };
        let glyph_info = driver
            .borrow_mut()
            .load_texture(&tiles.glyph_path)
            .context("loading extended glyph atlas")?;
        let glyph_texture = Texture {
            id: glyph_info.id,
            driver: Rc::clone(&driver),
        };

        // Atlas source rects use the unscaled tile size; scaling happens
        // in the destination rect of each draw.
        let font = Tileset::new(
            font_info.id,
            tiles.tile_width,
            tiles.tile_height,
            tiles.count,
        );
        let glyphs = Tileset::new(
            glyph_info.id,
            tiles.tile_width,
            tiles.tile_height,
            tiles.count,
        );

        let cell_width = config.cell_width();
        let cell_height = config.cell_height();
        let width = config.grid.columns;
        let height = config.grid.rows;

        let root_id = driver
            .borrow_mut()
            .create_texture(width * cell_width, height * cell_height)
            .context("creating root output texture")?;

        Ok(Display {
            root: Texture {
                id: root_id,
                driver: Rc::clone(&driver),
            },
            _font_texture: font_texture,
            _glyph_texture: glyph_texture,
            font,
            glyphs,
            palette: Palette::new(),
            width,
            height,
            cell_width,
            cell_height,
            terminal_mode: config.terminal_mode,
            driver,
            unflushed: false,
        })
    }

    /// Viewport width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Viewport height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// Replaces the active palette. Surfaces holding `Color::Indexed`
    /// values are recolored on their next render.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Allocates an owned render-target texture of the given pixel size.
    pub fn create_texture(&self, width_px: u32, height_px: u32) -> Result<Texture> {
        let id = self
            .driver
            .borrow_mut()
            .create_texture(width_px, height_px)?;
        Ok(Texture {
            id,
            driver: Rc::clone(&self.driver),
        })
    }

    /// Loads an image asset; sprites reference the returned info.
    pub fn load_texture(&self, path: &std::path::Path) -> Result<TextureInfo> {
        Ok(self.driver.borrow_mut().load_texture(path)?)
    }

    /// Redirects subsequent draw calls to `target`, or the screen when
    /// `None`.
    pub fn set_render_target(&mut self, target: Option<&Texture>) {
        self.driver
            .borrow_mut()
            .set_render_target(target.map(Texture::id));
    }

    /// Clears the current render target to transparent black.
    pub fn clear_target(&mut self) {
        self.driver.borrow_mut().clear_target();
    }

    /// Draws one cell at cell coordinates `(x, y)` on the current render
    /// target: a background-filled rectangle, then the glyph tinted to the
    /// foreground color, addressed through the primary or extended atlas.
    ///
    /// In terminal mode the background fill is always black; the requested
    /// background is ignored.
    pub fn draw_cell(&mut self, x: i32, y: i32, glyph: u16, fore: Color, back: Color) {
        let dst = PixelRect::new(
            x * self.cell_width as i32,
            y * self.cell_height as i32,
            self.cell_width,
            self.cell_height,
        );

        let back_rgb = if self.terminal_mode {
            Rgb::BLACK
        } else {
            back.resolve(&self.palette)
        };
        let fore_rgb = fore.resolve(&self.palette);

        let (tileset, index) = match GlyphAddress::of(glyph) {
            GlyphAddress::Primary(i) => (&self.font, i),
            GlyphAddress::Extended(i) => (&self.glyphs, i),
        };
        let src = tileset.source_rect(index);
        let atlas = tileset.texture;

        let mut drv = self.driver.borrow_mut();
        drv.fill_rect(dst, back_rgb);
        drv.copy(atlas, Some(src), Some(dst), Some(fore_rgb));
    }

    /// Shorthand for drawing a whole [`Cell`] value.
    pub fn draw_cell_value(&mut self, x: i32, y: i32, cell: &Cell) {
        self.draw_cell(x, y, cell.glyph, cell.fore, cell.back);
    }

    /// Draws a sprite at its pixel position on the current render target,
    /// using the sprite texture's full extent for source and destination.
    pub fn draw_sprite(&mut self, sprite: &crate::surface::Sprite) {
        let tex = sprite.texture;
        let src = PixelRect::new(0, 0, tex.width, tex.height);
        let dst = PixelRect::new(sprite.x, sprite.y, tex.width, tex.height);
        self.driver
            .borrow_mut()
            .copy(tex.id, Some(src), Some(dst), None);
    }

    /// Copies a surface's backing texture onto the root output texture at
    /// the surface's render rectangle.
    pub fn blit(&mut self, surface: &dyn Surface) {
        let mut drv = self.driver.borrow_mut();
        drv.set_render_target(Some(self.root.id));
        drv.copy(
            surface.texture().id(),
            None,
            Some(surface.render_rect()),
            None,
        );
        self.unflushed = true;
    }

    /// Fills a cell-aligned region of the root output with a solid color.
    pub fn clear_region(&mut self, rect: CellRect, color: Color) {
        let px = PixelRect::from_cells(rect, self.cell_width, self.cell_height);
        let rgb = color.resolve(&self.palette);
        let mut drv = self.driver.borrow_mut();
        drv.set_render_target(Some(self.root.id));
        drv.fill_rect(px, rgb);
        self.unflushed = true;
    }

    /// Presents the root output to the screen, if and only if something
    /// was blitted since the last flush.
    pub fn flush(&mut self) {
        if !self.unflushed {
            return;
        }
        trace!("Display: flush");
        let mut drv = self.driver.borrow_mut();
        drv.set_render_target(None);
        drv.copy(self.root.id, None, None, None);
        drv.present();
        self.unflushed = false;
    }

    /// Releases platform resources ahead of drop. Idempotent.
    pub fn cleanup(&mut self) -> Result<()> {
        Ok(self.driver.borrow_mut().cleanup()?)
    }
}
