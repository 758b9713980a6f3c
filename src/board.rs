//! # Paint board
//!
//! Owns the base composite surface and a bounded stack of live [`Layer`]s,
//! oldest first. The stack *is* the undo history: undo pops the newest, and
//! once the stack is past its depth budget the oldest layer is flattened into
//! the base so memory stays bounded no matter how long a session runs.
//!
//! The board never reaches into ambient window state - it is handed an opaque
//! [`DisplayRegion`] and asks it for the current extent when told to resize.

use crate::color::Color;
use crate::layer::{Layer, LayerId};
use crate::surface::{Surface, SurfaceError};
use crate::util::UnitF32;

/// Undo depth before the oldest layer is compacted into the base.
pub const DEFAULT_MAX_LAYERS: usize = 5;
/// Oversize applied to every surface beyond the region's extent, px. Absorbs
/// small viewport fluctuations (mobile chrome showing and hiding) without a
/// reallocation per change.
pub const RESIZE_MARGIN: u32 = 100;

/// An extent in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

/// The display region the board draws for. Only the current size is ever
/// asked of it.
pub trait DisplayRegion {
    fn extent(&self) -> Extent;
}
/// A fixed region that never changes size.
impl DisplayRegion for Extent {
    fn extent(&self) -> Extent {
        *self
    }
}

pub struct PaintBoard<R> {
    region: R,
    base: Surface,
    /// Oldest to newest.
    layers: Vec<Layer>,
    max_layers: usize,
    /// Largest extent the region has ever reported, per axis.
    max_seen: Extent,
    margin: u32,
}
impl<R: DisplayRegion> PaintBoard<R> {
    /// Construct against a display region, immediately sizing the base
    /// surface to the region's extent plus margin.
    pub fn new(region: R) -> Result<Self, SurfaceError> {
        let max_seen = region.extent();
        let base = Surface::new(
            max_seen.width + RESIZE_MARGIN,
            max_seen.height + RESIZE_MARGIN,
        )?;
        Ok(Self {
            region,
            base,
            layers: Vec::new(),
            max_layers: DEFAULT_MAX_LAYERS,
            max_seen,
            margin: RESIZE_MARGIN,
        })
    }
    /// Allocate a fresh layer on top of the stack, sized like every other
    /// surface the board owns. Compacts the oldest layer into the base if the
    /// stack is now past its depth budget.
    ///
    /// Drive the returned layer through [`Self::layer_mut`].
    pub fn add_layer(&mut self, color: Color, opacity: f32) -> Result<LayerId, SurfaceError> {
        let layer = Layer::new(
            self.base.width(),
            self.base.height(),
            color,
            UnitF32::saturating(opacity),
        )?;
        let id = layer.id();
        self.layers.push(layer);
        if self.layers.len() > self.max_layers {
            // Too many layers for the undo stack.
            self.merge();
        }
        Ok(id)
    }
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }
    #[must_use]
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }
    /// Discard the newest layer. Returns `false` (and changes nothing) when
    /// the stack is empty.
    pub fn undo(&mut self) -> bool {
        match self.layers.pop() {
            Some(layer) => {
                log::trace!("undid {}", layer.id());
                true
            }
            None => false, // no more layers to pop
        }
    }
    /// Flatten the oldest layer into the base surface, applying its stored
    /// opacity as one global alpha, and discard it.
    fn merge(&mut self) {
        // Only reached from `add_layer`, which just pushed - never empty.
        let bottom = self.layers.remove(0);
        log::debug!("merging {} into base", bottom.id());
        bottom
            .surface()
            .composite_onto(&mut self.base, bottom.opacity().get());
    }
    /// Re-read the display region's extent; if it has outgrown anything seen
    /// before, grow every owned surface to the new extent plus margin.
    ///
    /// Surfaces never shrink - a per-axis high-water mark makes a smaller
    /// report a no-op.
    pub fn resize(&mut self) -> Result<(), SurfaceError> {
        let extent = self.region.extent();
        if extent.width > self.max_seen.width || extent.height > self.max_seen.height {
            let grown = Extent {
                width: extent.width.max(self.max_seen.width),
                height: extent.height.max(self.max_seen.height),
            };
            let width = grown.width + self.margin;
            let height = grown.height + self.margin;
            log::trace!("growing surfaces to {width}x{height}");
            self.base.resize(width, height)?;
            for layer in &mut self.layers {
                layer.resize(width, height)?;
            }
            self.max_seen = grown;
        }
        Ok(())
    }
    /// Base plus every live layer, composited newest-on-top with per-layer
    /// opacity. What a caller presents to the screen.
    #[must_use]
    pub fn flatten(&self) -> Surface {
        let mut out = self.base.clone();
        for layer in &self.layers {
            layer.surface().composite_onto(&mut out, layer.opacity().get());
        }
        out
    }
    #[must_use]
    pub fn base(&self) -> &Surface {
        &self.base
    }
    /// Live layers, oldest first.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter()
    }
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}
impl<R> std::fmt::Debug for PaintBoard<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintBoard")
            .field("layers", &self.layers)
            .field("max_layers", &self.max_layers)
            .field("max_seen", &self.max_seen)
            .finish_non_exhaustive()
    }
}
