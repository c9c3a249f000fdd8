//! Fixed-size chunking of an ordered record stream.

use core::num::NonZeroUsize;

/// Groups pushed items into batches of at most `size` items.
///
/// Order is preserved both within and across batches.
#[derive(Debug, Clone)]
pub struct Batcher<T> {
    size: NonZeroUsize,
    pending: Vec<T>,
}

impl<T> Batcher<T> {
    /// Create a batcher emitting batches of `size` items.
    #[must_use]
    pub fn new(size: NonZeroUsize) -> Self {
        Self {
            size,
            pending: Vec::with_capacity(size.get()),
        }
    }

    /// Queue `item`, returning the completed batch once it reaches the size.
    pub fn push(&mut self, item: T) -> Option<Vec<T>> {
        self.pending.push(item);
        if self.pending.len() < self.size.get() {
            return None;
        }
        Some(core::mem::replace(
            &mut self.pending,
            Vec::with_capacity(self.size.get()),
        ))
    }

    /// The final, possibly short, batch; `None` when nothing is pending.
    #[must_use]
    pub fn finish(self) -> Option<Vec<T>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending)
        }
    }
}
