// src/display/driver.rs

//! `DisplayDriver` trait - minimal interface over the native graphics
//! backend.
//!
//! The trait is deliberately RISC-style: a handful of primitives (texture
//! lifecycle, render-target selection, filled rectangle, tinted copy,
//! present) that any render-to-texture backend can supply. All compositing
//! policy lives above it in [`Display`](crate::display::Display).
//!
//! ## Threading model
//! Drivers are single-threaded and owned by the thread that created the
//! window. Nothing here is `Send`; the engine's whole call graph is
//! synchronous.
//!
//! ## Lifecycle
//! 1. `new(&DisplayConfig)` - create the window/device with the configured
//!    pixel size, title, and presentation pacing.
//! 2. Primitive calls, driven by `Display`.
//! 3. `cleanup()` then `Drop` - release the window. Idempotent.

use anyhow::Result;
use std::path::Path;

use crate::color::Rgb;
use crate::config::DisplayConfig;
use crate::geometry::PixelRect;

/// Opaque handle to a GPU-resident texture owned by a driver.
///
/// Plain identifier only; ownership and release discipline live in
/// [`Texture`](crate::display::Texture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A loaded texture handle together with its pixel dimensions, as
/// reported by the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureInfo {
    pub id: TextureId,
    pub width: u32,
    pub height: u32,
}

/// Platform-specific display backend primitives.
pub trait DisplayDriver {
    /// Creates the native window/device per `config` and returns the
    /// driver. The frame-rate mode in `config.window` selects the
    /// backend's presentation pacing for the lifetime of the window.
    fn new(config: &DisplayConfig) -> Result<Self>
    where
        Self: Sized;

    /// Allocates a render-target texture of the given pixel size.
    ///
    /// Target textures must be blend-capable: the sparse and sprite
    /// surfaces rely on alpha compositing when their textures are blitted
    /// over lower layers.
    fn create_texture(&mut self, width_px: u32, height_px: u32) -> Result<TextureId>;

    /// Releases a texture. Calling this twice for one id is a caller bug;
    /// drivers may ignore unknown ids but are not required to.
    fn destroy_texture(&mut self, id: TextureId);

    /// Loads an image asset into a texture and reports its dimensions.
    fn load_texture(&mut self, path: &Path) -> Result<TextureInfo>;

    /// Redirects subsequent draw calls to `target`, or to the screen when
    /// `None`.
    fn set_render_target(&mut self, target: Option<TextureId>);

    /// Clears the current render target to transparent black.
    fn clear_target(&mut self);

    /// Fills `rect` on the current render target with an opaque color.
    fn fill_rect(&mut self, rect: PixelRect, color: Rgb);

    /// Copies a region of `src` onto the current render target.
    ///
    /// `None` for either rectangle means the whole texture; `tint`
    /// modulates the source colors (used to color glyphs from the
    /// white-on-transparent atlas).
    fn copy(
        &mut self,
        src: TextureId,
        src_rect: Option<PixelRect>,
        dst_rect: Option<PixelRect>,
        tint: Option<Rgb>,
    );

    /// Presents the screen target, honoring the configured pacing mode.
    fn present(&mut self);

    /// Releases platform resources ahead of `Drop`. Must be idempotent.
    fn cleanup(&mut self) -> Result<()>;
}
