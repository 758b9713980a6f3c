//! Utility types, used throughout the crate.

/// A float which is finite and within `[0, 1]`.
///
/// Backs everything the engine treats as a ratio: color channels, layer
/// opacity, pen pressure.
// Because of the preconditions invalidating many bitpatterns, this is not Pod.
#[derive(Copy, Clone, PartialEq, PartialOrd, bytemuck::NoUninit, bytemuck::Zeroable, Debug)]
#[repr(transparent)]
pub struct UnitF32(f32);
impl UnitF32 {
    pub const ZERO: Self = Self(0.0);
    pub const HALF: Self = Self(0.5);
    pub const ONE: Self = Self(1.0);
    pub fn new(val: f32) -> Result<Self, UnitF32Error> {
        if !val.is_finite() {
            Err(UnitF32Error::NotFinite)
        } else if !(0.0..=1.0).contains(&val) {
            Err(UnitF32Error::OutOfRange)
        } else {
            Ok(Self(val))
        }
    }
    /// Clamp into range instead of failing. NaN becomes zero.
    ///
    /// Input devices are allowed to be sloppy; the engine is not.
    #[must_use]
    pub fn saturating(val: f32) -> Self {
        if val.is_nan() {
            Self::ZERO
        } else {
            Self(val.clamp(0.0, 1.0))
        }
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for UnitF32 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f32> for UnitF32 {
    type Error = UnitF32Error;
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
impl From<UnitF32> for f32 {
    fn from(value: UnitF32) -> Self {
        value.get()
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitF32Error {
    #[error("not finite")]
    NotFinite,
    #[error("outside [0, 1]")]
    OutOfRange,
}

// This is safe - even though f32 is !Eq, we guarantee that no value is ever NaN
// So PartialEq can act like Eq
impl Eq for UnitF32 {}
#[allow(clippy::derive_ord_xor_partial_ord)]
impl Ord for UnitF32 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Unwrap OK - we guarantee the wrapped f32's are non-NaN and thus will never
        // compare as None.
        self.partial_cmp(other).unwrap()
    }
}
impl std::hash::Hash for UnitF32 {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.to_bits());
    }
}
