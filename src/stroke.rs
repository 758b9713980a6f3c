//! # Stroke plumbing
//!
//! Timekeeping and velocity smoothing for the brush. The renderer never reads
//! an ambient clock - callers forward the platform event timestamp, which
//! keeps interleaved multi-pointer streams honest and the math testable.

// u64::MAX ms is about 584 million years of continuous drawing. Should hold.
#[derive(
    bytemuck::Pod, bytemuck::Zeroable, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default,
)]
#[repr(transparent)]
pub struct Milliseconds(pub u64);
impl Milliseconds {
    /// Elapsed ms since `earlier`. Saturates to zero if time went backwards.
    #[must_use]
    pub fn saturating_since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Bounded rolling window of instantaneous pen velocities (px/ms), oldest
/// evicted first. The mean of the window is what drives stroke thickness -
/// raw per-event velocity is far too jittery to use directly.
#[derive(Clone, Debug, Default)]
pub struct VelocityWindow(smallvec::SmallVec<[f32; 5]>);
impl VelocityWindow {
    /// Matches the inline capacity of the backing array - the window never
    /// spills to the heap.
    pub const CAPACITY: usize = 5;

    pub fn clear(&mut self) {
        self.0.clear();
    }
    /// Push a sample, evicting the oldest if the window is full.
    ///
    /// Callers must only push finite values; the window does no filtering of
    /// its own.
    pub fn push(&mut self, velocity: f32) {
        if self.0.len() == Self::CAPACITY {
            self.0.remove(0);
        }
        self.0.push(velocity);
    }
    /// Arithmetic mean of the window. `None` before the first sample.
    #[must_use]
    pub fn average(&self) -> Option<f32> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.iter().sum::<f32>() / self.0.len() as f32)
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
