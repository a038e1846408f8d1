//! Fixed-Size Circular Buffer for Fix History
//!
//! ## Overview
//!
//! The heuristic tracker remembers when the receiver last changed lock
//! state. A ring buffer keeps the most recent entries in fixed memory:
//! - O(1) insertion (overwrites the oldest entry when full)
//! - O(n) iteration, oldest to newest
//!
//! Capacity is a const generic, so the tracker's memory is known at compile
//! time and never grows with the length of the recording.
//!
//! ### Memory Layout
//!
//! ```text
//! CircularBuffer<Offset, 4> after 6 pushes (r0..r5):
//! ┌────┬────┬────┬────┐
//! │ r4 │ r5 │ r2 │ r3 │  ← physical slots
//! └────┴────┴────┴────┘
//!          ↑
//!          └── write_pos = 2 (oldest entry, next to be overwritten)
//!
//! Logical view: [r2, r3, r4, r5]
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use gpslock_core::buffer::CircularBuffer;
//!
//! let mut history: CircularBuffer<u32, 3> = CircularBuffer::new();
//! for i in 0..5 {
//!     history.push(i);
//! }
//!
//! assert_eq!(history.len(), 3);
//! assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
//! ```

/// Fixed-size circular buffer
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Iteration yields entries in insertion order
///
/// Not thread-safe; owned by a single filter instance.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Storage; `None` marks slots never written
    data: [Option<T>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Number of valid entries, saturates at N
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates an empty buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Adds an entry, overwriting the oldest when full
    pub fn push(&mut self, item: T) {
        self.data[self.write_pos] = Some(item);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// Entry by logical index (0 = oldest, len-1 = newest)
    ///
    /// Until the buffer fills, logical and physical indices match. Once
    /// full, the oldest entry sits at `write_pos`:
    ///
    /// ```text
    /// Physical: [D, E, A, B, C]  (write_pos = 2)
    /// Logical:  [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over circular buffer contents, oldest first
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
