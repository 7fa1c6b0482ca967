// src/lib.rs

//! glyphgrid - a cell-grid rendering and compositing engine.
//!
//! Applications draw onto a fixed grid of colored glyphs, optionally
//! overlaid with free-form sprites, through a family of [`Surface`]
//! implementations:
//!
//! - [`DenseSurface`] - array-backed, every cell of a rectangle;
//! - [`SparseSurface`] - map-backed, only explicitly-touched cells;
//! - [`SpriteSurface`] - z-ordered sprites, no per-cell state.
//!
//! A [`LayerCompositor`] holds an ordered list of lazily-built surfaces
//! and blits the flagged ones onto a shared output each frame, which the
//! [`Display`] adapter presents to the screen at most once per frame via
//! a pluggable [`DisplayDriver`] backend.
//!
//! The engine is single-threaded and synchronous; correctness relies on
//! the strict per-frame call order: mutate surfaces, flag layers,
//! `LayerCompositor::render`, which flushes implicitly.
//!
//! ```no_run
//! use glyphgrid::{
//!     Color, DenseSurface, Display, DisplayConfig, HeadlessDriver, LayerCompositor, Surface,
//! };
//!
//! # fn main() -> glyphgrid::Result<()> {
//! let config = DisplayConfig::default();
//! let mut display = Display::open::<HeadlessDriver>(&config)?;
//!
//! let mut layers = LayerCompositor::new(vec![Box::new(|d: &Display| {
//!     Ok(Box::new(DenseSurface::new(d, 80, 25)?) as Box<dyn Surface>)
//! })]);
//!
//! let world = layers.get(0, &display)?;
//! world.print(2, 1, "@ stands here", Color::WHITE, None, Default::default())?;
//! layers.mark_for_render(0);
//! layers.render(&mut display);
//! # Ok(())
//! # }
//! ```

pub mod cell;
pub mod color;
pub mod compositor;
pub mod config;
pub mod display;
pub mod error;
pub mod geometry;
pub mod surface;
pub mod tileset;

pub use cell::{glyph_from_char, Cell, EXTENDED_GLYPH_BASE, GLYPH_CODE_LIMIT};
pub use color::{Color, Palette, Rgb, PALETTE_SIZE};
pub use compositor::{LayerCompositor, SurfaceFactory};
pub use config::{DisplayConfig, FrameRateMode, GridConfig, TilesetConfig, WindowConfig};
pub use display::drivers::HeadlessDriver;
pub use display::{Display, DisplayDriver, Texture, TextureId, TextureInfo};
pub use error::{Error, Result};
pub use geometry::{CellCoords, CellRect, PixelRect};
pub use surface::{
    ColoredChar, DenseSurface, SparseSurface, Sprite, SpriteSurface, Surface, TextAlignment,
};
pub use tileset::{GlyphAddress, Tileset, ATLAS_COLUMNS};
