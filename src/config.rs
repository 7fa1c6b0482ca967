// src/config.rs

//! Configuration structures for the rendering engine.
//!
//! These structs deserialize from a JSON file (or are built in code) and
//! describe everything the display adapter needs at construction time:
//! window geometry and title, presentation pacing, viewport size in cells,
//! atlas image locations, and the terminal-mode rendering flag.
//!
//! Every struct carries `#[serde(default)]` so a partial config file is
//! valid; defaults aim for a classic 80x25 grid of 8x8 tiles.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Presentation pacing strategy applied by the backend driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameRateMode {
    /// Present as fast as the caller drives the frame loop.
    Off,
    /// Synchronize presents to the display's vertical blank.
    #[default]
    VSync,
    /// Cap presentation at 30 frames per second.
    Limit30,
    /// Cap presentation at 60 frames per second.
    Limit60,
}

/// Complete configuration for constructing a [`Display`](crate::Display).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub window: WindowConfig,
    pub grid: GridConfig,
    pub tileset: TilesetConfig,
    /// When set, cell backgrounds always render black regardless of the
    /// requested color. A global rendering mode fixed at construction,
    /// not a per-call option.
    pub terminal_mode: bool,
}

impl DisplayConfig {
    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading display config {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("parsing display config {:?}", path))
    }

    /// Pixel width of one cell after scaling.
    pub fn cell_width(&self) -> u32 {
        self.tileset.tile_width * self.grid.pixel_mult
    }

    /// Pixel height of one cell after scaling.
    pub fn cell_height(&self) -> u32 {
        self.tileset.tile_height * self.grid.pixel_mult
    }
}

/// Native window parameters handed to the backend driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    pub frame_rate: FrameRateMode,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "glyphgrid".to_string(),
            width: 640,
            height: 400,
            frame_rate: FrameRateMode::default(),
        }
    }
}

/// Viewport geometry in cells, plus the integer pixel multiplier applied
/// to the tile size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
    pub pixel_mult: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            columns: 80,
            rows: 25,
            pixel_mult: 1,
        }
    }
}

/// Locations and geometry of the two atlas images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesetConfig {
    /// Primary font atlas, glyph codes 0-255 in CP437 order.
    pub font_path: PathBuf,
    /// Extended glyph atlas, glyph codes 256-511.
    pub glyph_path: PathBuf,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Tiles per atlas; both atlases share one layout.
    pub count: u16,
}

impl Default for TilesetConfig {
    fn default() -> Self {
        TilesetConfig {
            font_path: PathBuf::from("assets/font8x8.png"),
            glyph_path: PathBuf::from("assets/glyph8x8.png"),
            tile_width: 8,
            tile_height: 8,
            count: 256,
        }
    }
}
