//! # inkboard
//!
//! A pressure- and velocity-sensitive freehand drawing engine. Pointer
//! samples go in, tapered anti-aliased ink comes out, and a bounded stack of
//! per-stroke raster layers provides undo without unbounded memory growth -
//! once the stack is full, the oldest stroke is flattened into a base
//! composite surface.
//!
//! The engine is strictly a library: it never touches a window, a clock, or
//! an event loop. The embedding caller owns all of those and drives the
//! engine through [`board::PaintBoard`] and [`gesture::GestureRouter`].

pub mod board;
pub mod color;
pub mod geom;
pub mod gesture;
pub mod id;
pub mod layer;
pub mod stroke;
pub mod surface;
pub mod util;

pub use board::{DisplayRegion, Extent, PaintBoard};
pub use color::Color;
pub use gesture::{GestureRouter, PointerId};
pub use layer::{Layer, LayerId};
pub use stroke::Milliseconds;
pub use surface::{Snapshot, Surface, SurfaceError};
