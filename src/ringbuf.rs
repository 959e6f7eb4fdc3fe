use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::BufferConfig;

/// Capacity used by [`RingBuffer::default`] when none is given.
pub const DEFAULT_CAPACITY: usize = 4 * 1024;

/// A fixed-capacity circular buffer guarded by a single internal mutex.
/// When full, pushing a new element automatically drops the oldest one.
///
/// Every method takes `&self`; the mutex provides interior mutability, so a
/// buffer behind an `Arc` can be shared freely across threads. Queries
/// (`len`, `is_empty`, `is_full`) acquire the same lock as the mutators and
/// are therefore consistent snapshots, not advisory reads. `capacity` alone
/// is lock-free since it never changes after construction.
///
/// No operation errors or blocks beyond the lock: reading an empty buffer
/// yields `None` (or a short count from [`read_into`](Self::read_into)), and
/// writing a full buffer silently evicts the oldest element.
#[derive(Debug)]
pub struct RingBuffer<T> {
    inner: Mutex<RingState<T>>,
    capacity: usize,
}

#[derive(Debug)]
struct RingState<T> {
    /// Backing store, allocated once at construction and never resized.
    /// A slot outside the occupied region holds `None` or a stale value
    /// that is logically unreachable.
    buf: Vec<Option<T>>,
    /// Next write slot.
    head: usize,
    /// Next read slot.
    tail: usize,
    /// Disambiguates `head == tail`: true iff the buffer holds
    /// `capacity` elements.
    full: bool,
}

impl<T> RingState<T> {
    fn len(&self, capacity: usize) -> usize {
        if self.full {
            capacity
        } else if self.head >= self.tail {
            self.head - self.tail
        } else {
            capacity + self.head - self.tail
        }
    }
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer holding at most `capacity` elements.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be > 0");
        let mut buf = Vec::with_capacity(capacity);
        buf.resize_with(capacity, || None);
        Self {
            inner: Mutex::new(RingState {
                buf,
                head: 0,
                tail: 0,
                full: false,
            }),
            capacity,
        }
    }

    /// Create a buffer sized by a (sanitized) configuration.
    pub fn from_config(config: &BufferConfig) -> Self {
        let mut cfg = config.clone();
        cfg.sanitize();
        Self::new(cfg.capacity)
    }

    // A poisoned lock only means another thread panicked mid-operation;
    // the state it protects is still index-valid, so keep every operation
    // total instead of propagating the panic.
    fn state(&self) -> MutexGuard<'_, RingState<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an element. If the buffer is at capacity, the oldest element
    /// is dropped to make room. Never fails.
    pub fn put(&self, item: T) {
        let mut s = self.state();
        let head = s.head;
        s.buf[head] = Some(item);
        if s.full {
            s.tail = (s.tail + 1) % self.capacity;
        }
        s.head = (head + 1) % self.capacity;
        s.full = s.head == s.tail;
    }

    /// Remove and return the oldest element, or `None` if the buffer is
    /// empty.
    pub fn get(&self) -> Option<T> {
        let mut s = self.state();
        if !s.full && s.head == s.tail {
            return None;
        }
        let tail = s.tail;
        let val = s.buf[tail].take();
        s.full = false;
        s.tail = (tail + 1) % self.capacity;
        val
    }

    /// Like [`get`](Self::get), but an empty buffer yields `T::default()`
    /// instead of `None`.
    pub fn get_or_default(&self) -> T
    where
        T: Default,
    {
        self.get().unwrap_or_default()
    }

    /// Logically empty the buffer. Slot contents are not cleared; stale
    /// values stay in the backing store until overwritten but can no longer
    /// be read.
    pub fn reset(&self) {
        let mut s = self.state();
        s.tail = s.head;
        s.full = false;
    }

    /// Number of elements currently held, in `[0, capacity]`.
    pub fn len(&self) -> usize {
        let s = self.state();
        s.len(self.capacity)
    }

    pub fn is_empty(&self) -> bool {
        let s = self.state();
        !s.full && s.head == s.tail
    }

    pub fn is_full(&self) -> bool {
        self.state().full
    }

    /// Maximum number of elements; fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append every element of `items` in order via [`put`](Self::put).
    ///
    /// Each element is its own locked operation, so this is not atomic as a
    /// batch: another thread may interleave between elements, and a slice
    /// longer than the capacity overwrites earlier elements of the same
    /// call.
    pub fn write(&self, items: &[T])
    where
        T: Clone,
    {
        for item in items {
            self.put(item.clone());
        }
    }

    /// Pop elements oldest-first into `out` until it is filled or the
    /// buffer empties. Returns the count actually read, which may be short;
    /// slots of `out` past that count keep their prior values.
    ///
    /// Like [`write`](Self::write), each element transfer is an independent
    /// locked operation rather than one atomic batch.
    pub fn read_into(&self, out: &mut [T]) -> usize {
        let mut count = 0;
        for slot in out.iter_mut() {
            if self.is_empty() {
                break;
            }
            match self.get() {
                Some(val) => {
                    *slot = val;
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    /// Non-destructive copy of the contents, oldest first, taken under a
    /// single lock hold.
    pub fn snapshot(&self) -> Vec<T>
    where
        T: Clone,
    {
        let s = self.state();
        let len = s.len(self.capacity);
        let mut out = Vec::with_capacity(len);
        for i in 0..len {
            let idx = (s.tail + i) % self.capacity;
            if let Some(v) = &s.buf[idx] {
                out.push(v.clone());
            }
        }
        out
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
