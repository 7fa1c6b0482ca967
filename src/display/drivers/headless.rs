// src/display/drivers/headless.rs

//! Headless display driver.
//!
//! Opens no window and rasterizes nothing; it hands out texture ids and
//! accepts every draw call. Useful for server-side simulation, benchmarks,
//! and as the fallback backend where no windowing system exists.

use anyhow::Result;
use log::{debug, info, trace};
use std::collections::HashSet;
use std::path::Path;

use crate::color::Rgb;
use crate::config::DisplayConfig;
use crate::display::driver::{DisplayDriver, TextureId, TextureInfo};
use crate::geometry::PixelRect;

pub struct HeadlessDriver {
    next_id: u32,
    live: HashSet<TextureId>,
    tile_width: u32,
    tile_height: u32,
}

impl HeadlessDriver {
    /// Number of textures currently allocated and not yet destroyed.
    pub fn live_textures(&self) -> usize {
        self.live.len()
    }

    fn allocate(&mut self) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.live.insert(id);
        id
    }
}

impl DisplayDriver for HeadlessDriver {
    fn new(config: &DisplayConfig) -> Result<Self> {
        info!(
            "HeadlessDriver: {}x{} px, frame rate {:?} (ignored)",
            config.window.width, config.window.height, config.window.frame_rate
        );
        Ok(HeadlessDriver {
            next_id: 1,
            live: HashSet::new(),
            tile_width: config.tileset.tile_width,
            tile_height: config.tileset.tile_height,
        })
    }

    fn create_texture(&mut self, width_px: u32, height_px: u32) -> Result<TextureId> {
        let id = self.allocate();
        debug!(
            "HeadlessDriver: create_texture {}x{} -> {:?}",
            width_px, height_px, id
        );
        Ok(id)
    }

    fn destroy_texture(&mut self, id: TextureId) {
        debug!("HeadlessDriver: destroy_texture {:?}", id);
        self.live.remove(&id);
    }

    fn load_texture(&mut self, path: &Path) -> Result<TextureInfo> {
        // Atlases are assumed to be full 16x16 tile sheets.
        let id = self.allocate();
        debug!("HeadlessDriver: load_texture {:?} -> {:?}", path, id);
        Ok(TextureInfo {
            id,
            width: self.tile_width * 16,
            height: self.tile_height * 16,
        })
    }

    fn set_render_target(&mut self, target: Option<TextureId>) {
        trace!("HeadlessDriver: set_render_target {:?}", target);
    }

    fn clear_target(&mut self) {}

    fn fill_rect(&mut self, _rect: PixelRect, _color: Rgb) {}

    fn copy(
        &mut self,
        _src: TextureId,
        _src_rect: Option<PixelRect>,
        _dst_rect: Option<PixelRect>,
        _tint: Option<Rgb>,
    ) {
    }

    fn present(&mut self) {
        trace!("HeadlessDriver: present");
    }

    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}
