//! Fixed-capacity double-ended ring buffer
//!
//! Holds at most `capacity` elements and never grows. Inserting into a full
//! buffer overwrites the element at the opposite end:
//! - `insert_head` on a full buffer drops the tail
//! - `insert_tail` on a full buffer drops the head
//!
//! Iteration always runs tail → head.

use std::fmt;

/// A fixed-capacity deque with overwrite-on-full semantics
#[derive(Clone)]
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    /// Physical index of the tail element
    start: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer. A capacity of 0 is clamped to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            tracing::warn!("RingBuffer capacity of 0 requested, using 1");
            1
        } else {
            capacity
        };

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            start: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Map a logical position (0 = tail) to a slot index
    #[inline]
    fn physical(&self, logical: usize) -> usize {
        (self.start + logical) % self.capacity()
    }

    /// The most recently inserted element at the head end, if any
    pub fn head(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.physical(self.len - 1)].as_ref()
    }

    /// The element at the tail end, if any
    pub fn tail(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[self.start].as_ref()
    }

    /// Element at a logical position counted from the tail
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[self.physical(index)].as_ref()
    }

    /// Add an element at the head. Returns true if the tail was overwritten.
    pub fn insert_head(&mut self, value: T) -> bool {
        if self.is_full() {
            // The slot after the head is the current tail
            let idx = self.start;
            self.slots[idx] = Some(value);
            self.start = (self.start + 1) % self.capacity();
            true
        } else {
            let idx = self.physical(self.len);
            self.slots[idx] = Some(value);
            self.len += 1;
            false
        }
    }

    /// Add an element at the tail. Returns true if the head was overwritten.
    pub fn insert_tail(&mut self, value: T) -> bool {
        let cap = self.capacity();
        // When full, the slot before the tail is the current head
        let overwrite = self.is_full();
        self.start = (self.start + cap - 1) % cap;
        self.slots[self.start] = Some(value);
        if !overwrite {
            self.len += 1;
        }
        overwrite
    }

    /// Remove and return the head element
    pub fn remove_head(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let idx = self.physical(self.len - 1);
        self.len -= 1;
        self.slots[idx].take()
    }

    /// Remove and return the tail element
    pub fn remove_tail(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let idx = self.start;
        self.start = (self.start + 1) % self.capacity();
        self.len -= 1;
        self.slots[idx].take()
    }

    /// Drop all elements, keeping the capacity
    ///
    /// Only occupied slots are touched, so the cost is paid for by the
    /// inserts that filled them (amortized O(1) per element).
    pub fn clear(&mut self) {
        for logical in 0..self.len {
            let idx = self.physical(logical);
            self.slots[idx] = None;
        }
        self.start = 0;
        self.len = 0;
    }

    /// Iterate tail → head
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: self,
            front: 0,
            back: self.len,
        }
    }
}

/// Tail → head iterator over a [`RingBuffer`]
pub struct Iter<'a, T> {
    buffer: &'a RingBuffer<T>,
    front: usize,
    back: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.buffer.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.buffer.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
