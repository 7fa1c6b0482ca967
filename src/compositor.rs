// src/compositor.rs

//! The layer compositor: an ordered list of lazily-constructed surfaces
//! blitted onto the shared output in list order.
//!
//! List position is the z-order - later layers land on top of earlier
//! ones. Two levels of dirtiness cooperate here: each surface's own dirty
//! bit decides whether its backing texture is redrawn, while the per-frame
//! render flag set by [`LayerCompositor::mark_for_render`] decides whether
//! the layer participates in this frame's composite at all. A HUD layer
//! can therefore keep its content alive across frames and only be
//! re-blitted when flagged, even while the world layer beneath it redraws
//! every frame.

use log::{debug, trace};

use crate::display::Display;
use crate::error::Result;
use crate::surface::Surface;

/// Deferred surface constructor. Invoked at most once, on first access to
/// the layer.
pub type SurfaceFactory = Box<dyn FnOnce(&Display) -> Result<Box<dyn Surface>>>;

struct Layer {
    factory: Option<SurfaceFactory>,
    surface: Option<Box<dyn Surface>>,
    should_render: bool,
}

impl Layer {
    /// Materializes the surface on first access. A layer never holds more
    /// than one surface instance over its lifetime.
    fn materialize(&mut self, display: &Display) -> Result<&mut Box<dyn Surface>> {
        if self.surface.is_none() {
            let factory = self
                .factory
                .take()
                .expect("layer accessed after dispose()");
            self.surface = Some(factory(display)?);
        }
        Ok(self.surface.as_mut().expect("just materialized"))
    }
}

/// Ordered collection of render layers over a shared [`Display`] output.
pub struct LayerCompositor {
    layers: Vec<Layer>,
}

impl LayerCompositor {
    /// Builds the compositor from surface factories, front (bottom) to
    /// back (top). No surface is constructed yet.
    pub fn new(factories: Vec<SurfaceFactory>) -> Self {
        debug!("LayerCompositor: {} layers", factories.len());
        LayerCompositor {
            layers: factories
                .into_iter()
                .map(|factory| Layer {
                    factory: Some(factory),
                    surface: None,
                    should_render: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the surface at `index`, constructing it on first access.
    ///
    /// # Panics
    /// Panics if `index` is out of range or the compositor was disposed;
    /// both are programmer errors, not runtime conditions.
    pub fn get(&mut self, index: usize, display: &Display) -> Result<&mut dyn Surface> {
        Ok(&mut **self.layers[index].materialize(display)?)
    }

    /// Flags the layer at `index` to participate in the next `render`.
    /// Does not itself trigger any drawing.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn mark_for_render(&mut self, index: usize) {
        self.layers[index].should_render = true;
    }

    /// Composites one frame: every materialized, flagged layer renders
    /// itself (a no-op while its own dirty bit is clear) and is blitted
    /// onto the display's output in layer order; flags are cleared. The
    /// display is flushed once if anything was blitted.
    ///
    /// Calling this before any layer is materialized is a no-op.
    pub fn render(&mut self, display: &mut Display) {
        let mut blitted = false;
        for (index, layer) in self.layers.iter_mut().enumerate() {
            if !layer.should_render {
                continue;
            }
            // Flagged but never materialized: nothing to draw yet. The
            // flag stays set so the layer composites once it exists.
            let Some(surface) = layer.surface.as_mut() else {
                continue;
            };
            trace!("LayerCompositor: layer {} render+blit", index);
            surface.render(display);
            display.blit(&**surface);
            layer.should_render = false;
            blitted = true;
        }
        if blitted {
            display.flush();
        }
    }

    /// Drops every materialized surface, releasing its backing texture.
    /// Unmaterialized layers have nothing to release.
    pub fn dispose(&mut self) {
        debug!("LayerCompositor: dispose");
        for layer in &mut self.layers {
            layer.surface = None;
            layer.should_render = false;
        }
    }
}
