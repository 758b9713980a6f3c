//! # Gesture routing
//!
//! Multi-touch plumbing between a platform event stream and the board. Each
//! pointer that goes down gets its own layer; interleaved move events are
//! routed by pointer id, so two fingers drawing at once never share brush
//! state. Concurrency is purely logical - everything runs on the caller's
//! event loop, one event at a time.

use hashbrown::HashMap;

use crate::board::{DisplayRegion, PaintBoard};
use crate::color::Color;
use crate::layer::LayerId;
use crate::stroke::Milliseconds;
use crate::surface::SurfaceError;

/// Opaque platform pointer identifier. Whatever the windowing layer reports,
/// as long as it is stable for the duration of one gesture.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct PointerId(pub u64);

/// Maps pointers with a gesture in progress to the layer collecting it.
#[derive(Default, Debug)]
pub struct GestureRouter {
    active: HashMap<PointerId, LayerId>,
}
impl GestureRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// A pointer went down: allocate a layer for its gesture and start the
    /// brush there. Any gesture the pointer was already mapped to is simply
    /// abandoned in place, like a lost pointer-up.
    pub fn pointer_down<R: DisplayRegion>(
        &mut self,
        board: &mut PaintBoard<R>,
        pointer: PointerId,
        color: Color,
        opacity: f32,
        pos: [f32; 2],
        now: Milliseconds,
    ) -> Result<LayerId, SurfaceError> {
        let id = board.add_layer(color, opacity)?;
        if let Some(layer) = board.layer_mut(id) {
            layer.start(pos, now);
        }
        self.active.insert(pointer, id);
        Ok(id)
    }
    /// A pointer moved: paint on its gesture's layer, if both the mapping
    /// and the layer still exist. Unknown pointers, and pointers whose layer
    /// has since been undone or merged, are silently ignored.
    pub fn pointer_move<R: DisplayRegion>(
        &mut self,
        board: &mut PaintBoard<R>,
        pointer: PointerId,
        pos: [f32; 2],
        pressure: Option<f32>,
        now: Milliseconds,
    ) {
        let Some(&id) = self.active.get(&pointer) else {
            return;
        };
        let Some(layer) = board.layer_mut(id) else {
            return;
        };
        layer.paint(pos, pressure, now);
    }
    /// A pointer lifted: stop routing to its layer. The layer itself stays
    /// on the board's stack until undone or merged.
    pub fn pointer_up(&mut self, pointer: PointerId) -> Option<LayerId> {
        self.active.remove(&pointer)
    }
    /// Number of gestures currently in progress.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
