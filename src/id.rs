//! # IDs
//!
//! Process-unique handles, namespaced by a marker type. The board hands one
//! out per layer so that routing state (see [`crate::gesture`]) can keep
//! referring to a layer after it has been undone or merged - a stale id
//! simply stops resolving.

// One counter shared by every namespace. IDs are unique program-wide; the
// namespace only prevents comparing ids of different kinds at compile time.
static NEXT_ID: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// ID that is guaranteed unique within this execution of the program.
pub struct InkId<T: std::any::Any> {
    id: std::num::NonZeroU64,
    // Namespace marker
    _phantom: std::marker::PhantomData<T>,
}
impl<T: std::any::Any> Clone for InkId<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: std::any::Any> Copy for InkId<T> {}
impl<T: std::any::Any> PartialEq for InkId<T> {
    fn eq(&self, other: &Self) -> bool {
        // Namespace already checked at compile time - Self::T == Other::T of course!
        self.id == other.id
    }
}
impl<T: std::any::Any> Eq for InkId<T> {}

// Safety - it's literally just a u64. We need these because if T is !Send or
// !Sync that is carried over to the ID, even though we don't store a T.
unsafe impl<T: std::any::Any> Send for InkId<T> {}
unsafe impl<T: std::any::Any> Sync for InkId<T> {}

impl<T: std::any::Any> std::hash::Hash for InkId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: std::any::Any> InkId<T> {
    /// Get the raw numeric value of this ID.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id.get()
    }
}
impl<T: std::any::Any> Default for InkId<T> {
    fn default() -> Self {
        let id = NEXT_ID.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let Some(id) = std::num::NonZeroU64::new(id) else {
            // Wrapped around after u64::MAX allocations. We cannot hand out a
            // duplicate - global state is unfixably borked!
            std::process::abort();
        };
        Self {
            id,
            _phantom: std::marker::PhantomData,
        }
    }
}
impl<T: std::any::Any> std::fmt::Display for InkId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Unwrap here is safe - rsplit always returns at least one element, even for empty strings.
        write!(
            f,
            "{}#{}",
            std::any::type_name::<T>().rsplit("::").next().unwrap(),
            self.id
        )
    }
}
impl<T: std::any::Any> std::fmt::Debug for InkId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}
