// src/error.rs

//! Error taxonomy for the rendering core.
//!
//! Only two conditions are recoverable enough to surface as typed errors:
//! a surface variant being asked for a capability it does not implement,
//! and palette registration failures. Everything coming up from the
//! backend driver (window creation, texture allocation, asset loading) is
//! wrapped as an opaque `Backend` error.
//!
//! Out-of-range cell coordinates are deliberately *not* an error: grid
//! surfaces silently drop them, since drawing past a viewport edge is a
//! routine occurrence that must not abort a frame. Out-of-range *layer*
//! indices into the compositor are a programmer error and panic, like any
//! other slice index.

use thiserror::Error;

/// Errors produced by the rendering core.
#[derive(Debug, Error)]
pub enum Error {
    /// A capability not implemented by the given surface variant, e.g.
    /// cell drawing on a sprite-only surface. Fatal to the call; signals a
    /// caller/design mismatch rather than a runtime condition.
    #[error("{surface} surface does not support {operation}")]
    Unsupported {
        surface: &'static str,
        operation: &'static str,
    },

    /// All 256 palette slots are occupied.
    #[error("palette is full (256 colors)")]
    PaletteFull,

    /// A palette key was registered twice. Indices are append-only and
    /// stable, so re-registration is always a mistake.
    #[error("palette key {0:?} already registered")]
    DuplicatePaletteKey(String),

    /// Failure reported by the backend display driver.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
