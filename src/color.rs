//! # Color
//!
//! Straight-alpha RGBA. The engine does no blending math of its own - a
//! layer's ink is a single color, and per-layer opacity is applied only when
//! compositing whole surfaces - so all this type has to do is guarantee the
//! channels are sane before they reach the rasterizer.

use crate::util::{UnitF32, UnitF32Error};

/// A straight-alpha RGBA color. Every channel is finite and in `[0, 1]`.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, bytemuck::Zeroable, Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct Color([UnitF32; 4]);
impl Color {
    pub const TRANSPARENT: Self = Self([UnitF32::ZERO; 4]);
    pub const BLACK: Self = Self([
        UnitF32::ZERO,
        UnitF32::ZERO,
        UnitF32::ZERO,
        UnitF32::ONE,
    ]);
    pub const WHITE: Self = Self([UnitF32::ONE; 4]);

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Result<Self, ColorError> {
        Ok(Self([
            UnitF32::new(r)?,
            UnitF32::new(g)?,
            UnitF32::new(b)?,
            UnitF32::new(a)?,
        ]))
    }
    /// Opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        let channel = |v: u8| {
            // Unwrap OK - u8 / 255 is always a finite value in [0, 1].
            UnitF32::new(f32::from(v) / 255.0).unwrap()
        };
        Self([channel(r), channel(g), channel(b), UnitF32::ONE])
    }
    #[must_use]
    pub fn as_array(&self) -> [f32; 4] {
        [
            self.0[0].get(),
            self.0[1].get(),
            self.0[2].get(),
            self.0[3].get(),
        ]
    }
    /// Convert into the rasterizer's color type.
    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        let [r, g, b, a] = self.as_array();
        // Unwrap OK - channels are validated to [0, 1] on construction.
        tiny_skia::Color::from_rgba(r, g, b, a).unwrap()
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorError {
    #[error(transparent)]
    Channel(#[from] UnitF32Error),
}

#[cfg(test)]
mod test {
    use super::Color;

    #[test]
    fn rejects_bad_channels() {
        assert!(Color::new(0.0, f32::NAN, 0.0, 1.0).is_err());
        assert!(Color::new(0.0, 0.0, 2.0, 1.0).is_err());
        assert!(Color::new(0.25, 0.5, 0.75, 1.0).is_ok());
    }
    #[test]
    fn from_rgb8_is_opaque() {
        let c = Color::from_rgb8(255, 0, 127).as_array();
        assert_eq!(c[0], 1.0);
        assert_eq!(c[1], 0.0);
        assert!((c[2] - 127.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[3], 1.0);
    }
}
