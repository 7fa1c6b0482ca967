// src/display/drivers/mock.rs

//! Recording driver for tests: every primitive call is logged so tests
//! can assert on exactly what reached the backend.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::color::Rgb;
use crate::config::DisplayConfig;
use crate::display::driver::{DisplayDriver, TextureId, TextureInfo};
use crate::geometry::PixelRect;

/// One recorded driver primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverCall {
    CreateTexture {
        id: TextureId,
        width: u32,
        height: u32,
    },
    DestroyTexture(TextureId),
    LoadTexture {
        id: TextureId,
        path: PathBuf,
    },
    SetRenderTarget(Option<TextureId>),
    ClearTarget,
    FillRect {
        rect: PixelRect,
        color: Rgb,
    },
    Copy {
        src: TextureId,
        src_rect: Option<PixelRect>,
        dst_rect: Option<PixelRect>,
        tint: Option<Rgb>,
    },
    Present,
}

#[derive(Default)]
pub struct MockDriver {
    next_id: u32,
    pub calls: Vec<DriverCall>,
    /// When set, `create_texture` fails instead of allocating.
    pub fail_create_texture: bool,
}

impl MockDriver {
    pub fn new() -> Self {
        MockDriver {
            next_id: 1,
            calls: Vec::new(),
            fail_create_texture: false,
        }
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count<F: Fn(&DriverCall) -> bool>(&self, pred: F) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn presents(&self) -> usize {
        self.count(|c| matches!(c, DriverCall::Present))
    }

    fn allocate(&mut self) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl DisplayDriver for MockDriver {
    fn new(_config: &DisplayConfig) -> Result<Self> {
        Ok(MockDriver::new())
    }

    fn create_texture(&mut self, width_px: u32, height_px: u32) -> Result<TextureId> {
        if self.fail_create_texture {
            anyhow::bail!("texture allocation refused");
        }
        let id = self.allocate();
        self.calls.push(DriverCall::CreateTexture {
            id,
            width: width_px,
            height: height_px,
        });
        Ok(id)
    }

    fn destroy_texture(&mut self, id: TextureId) {
        self.calls.push(DriverCall::DestroyTexture(id));
    }

    fn load_texture(&mut self, path: &Path) -> Result<TextureInfo> {
        let id = self.allocate();
        self.calls.push(DriverCall::LoadTexture {
            id,
            path: path.to_path_buf(),
        });
        Ok(TextureInfo {
            id,
            width: 128,
            height: 128,
        })
    }

    fn set_render_target(&mut self, target: Option<TextureId>) {
        self.calls.push(DriverCall::SetRenderTarget(target));
    }

    fn clear_target(&mut self) {
        self.calls.push(DriverCall::ClearTarget);
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        self.calls.push(DriverCall::FillRect { rect, color });
    }

    fn copy(
        &mut self,
        src: TextureId,
        src_rect: Option<PixelRect>,
        dst_rect: Option<PixelRect>,
        tint: Option<Rgb>,
    ) {
        self.calls.push(DriverCall::Copy {
            src,
            src_rect,
            dst_rect,
            tint,
        });
    }

    fn present(&mut self) {
        self.calls.push(DriverCall::Present);
    }

    fn cleanup(&mut self) -> Result<()> {
        Ok(())
    }
}
