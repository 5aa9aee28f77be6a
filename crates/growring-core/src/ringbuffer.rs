use alloc::boxed::Box;
use core::fmt;
use core::mem::{self, MaybeUninit};
use core::ptr;

use growring_common::index::{wrap_dec, wrap_inc, wrap_offset};
use growring_common::{dev_debug, dev_trace};

use crate::iter::{IntoIter, Iter};

/// A growable, double-ended ring buffer backed by a single
/// `Box<[MaybeUninit<T>]>` allocation.
///
/// Live elements occupy a contiguous circular range of the backing
/// slice starting at `head` and ending at `tail` (both inclusive). The
/// logical element at position `p` lives at `(head + p) % capacity`.
/// When an insertion finds the buffer full, the storage is replaced by
/// one twice as large and the elements are laid out linearly from slot
/// zero. Storage never shrinks.
///
/// Reads and removals on an empty buffer, and accesses past the live
/// range, return `None` instead of panicking.
pub struct RingBuffer<T> {
    buf: Box<[MaybeUninit<T>]>,
    head: usize,
    // Only meaningful while `len > 0`.
    tail: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer with room for `capacity` elements before
    /// the first growth. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = usize::max(1, capacity);
        Self {
            buf: Box::<[T]>::new_uninit_slice(capacity),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Returns the number of elements currently stored in the buffer.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if the next insertion will grow the storage.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the number of slots in the backing storage.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Maps a logical position to an index in the backing storage.
    #[inline(always)]
    fn physical_index(&self, position: usize) -> usize {
        wrap_offset(self.head, position, self.capacity())
    }

    #[inline(always)]
    fn slot(&self, idx: usize) -> &MaybeUninit<T> {
        debug_assert!(idx < self.capacity());
        unsafe {
            // SAFETY: callers only pass indices produced by the `wrap_*`
            // helpers or the cursors, which are always in `[0, capacity)`.
            self.buf.get_unchecked(idx)
        }
    }

    #[inline(always)]
    fn slot_mut(&mut self, idx: usize) -> &mut MaybeUninit<T> {
        debug_assert!(idx < self.capacity());
        unsafe {
            // SAFETY: see `slot`.
            self.buf.get_unchecked_mut(idx)
        }
    }

    /// Returns a reference to the element at logical `position`, or
    /// `None` if `position >= len`.
    #[inline]
    pub fn get(&self, position: usize) -> Option<&T> {
        if position >= self.len {
            return None;
        }

        Some(unsafe {
            // SAFETY: `position < len`, so the slot holds a live element.
            self.slot(self.physical_index(position)).assume_init_ref()
        })
    }

    /// Returns a mutable reference to the element at logical `position`,
    /// or `None` if `position >= len`.
    #[inline]
    pub fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        if position >= self.len {
            return None;
        }

        let idx = self.physical_index(position);
        Some(unsafe {
            // SAFETY: `position < len`, so the slot holds a live element.
            self.slot_mut(idx).assume_init_mut()
        })
    }

    /// Replaces the element at logical `position`, dropping the previous
    /// one. Positions outside `0..len` are ignored and `value` is
    /// dropped; the return value tells whether the write happened.
    pub fn set(&mut self, position: usize, value: T) -> bool {
        if position >= self.len {
            dev_trace!("Ignoring set at position {} (len {})", position, self.len);
            return false;
        }

        let idx = self.physical_index(position);
        unsafe {
            // SAFETY: `position < len`, so the slot holds a live element
            // which the assignment drops.
            *self.slot_mut(idx).assume_init_mut() = value;
        }
        true
    }

    /// Doubles the storage, moving the live elements to slots
    /// `0..len` in logical order.
    ///
    /// Called by [`push`](Self::push) and [`unshift`](Self::unshift)
    /// when the buffer is full. Panics if the new capacity overflows
    /// `usize`.
    pub fn grow(&mut self) {
        let old_cap = self.capacity();
        let Some(new_cap) = old_cap.checked_mul(2) else {
            panic!("RingBuffer capacity overflow ({} * 2)", old_cap);
        };

        let mut new_buf = Box::<[T]>::new_uninit_slice(new_cap);

        // The live range is at most two runs: `head..` up to the end of
        // the old storage, then the wrapped part from slot zero.
        let first_run = usize::min(self.len, old_cap - self.head);
        unsafe {
            // SAFETY: both runs are live slots of the old storage, and the
            // destination has room for `len <= old_cap < new_cap` elements.
            // The old storage is `MaybeUninit`, so dropping it afterwards
            // does not drop the moved values.
            ptr::copy_nonoverlapping(self.buf.as_ptr().add(self.head), new_buf.as_mut_ptr(), first_run);
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_mut_ptr().add(first_run), self.len - first_run);
        }

        self.buf = new_buf;
        self.head = 0;
        self.tail = self.len.saturating_sub(1);
        dev_debug!("RingBuffer grown from {} to {} slots with {} elements", old_cap, new_cap, self.len);
    }

    /// Appends an element to the back, growing the storage if full.
    pub fn push(&mut self, value: T) {
        if self.is_full() {
            self.grow();
        }

        if self.is_empty() {
            // The first element always lands on `head`.
            self.tail = self.head;
        } else {
            self.tail = wrap_inc(self.tail, self.capacity());
        }

        let tail = self.tail;
        *self.slot_mut(tail) = MaybeUninit::new(value);
        self.len += 1;
    }

    /// Prepends an element to the front, growing the storage if full.
    pub fn unshift(&mut self, value: T) {
        if self.is_full() {
            self.grow();
        }

        if self.is_empty() {
            self.tail = self.head;
        } else {
            self.head = wrap_dec(self.head, self.capacity());
        }

        let head = self.head;
        *self.slot_mut(head) = MaybeUninit::new(value);
        self.len += 1;
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            dev_trace!("pop on empty RingBuffer");
            return None;
        }

        let tail = self.tail;
        self.tail = wrap_dec(tail, self.capacity());
        self.len -= 1;
        Some(unsafe {
            // SAFETY: the buffer was non-empty, so `tail` held the last live
            // element. It is no longer counted as live, so it is read once.
            self.slot(tail).assume_init_read()
        })
    }

    /// Removes and returns the first element, or `None` if empty.
    pub fn shift(&mut self) -> Option<T> {
        if self.is_empty() {
            dev_trace!("shift on empty RingBuffer");
            return None;
        }

        let head = self.head;
        self.head = wrap_inc(head, self.capacity());
        self.len -= 1;
        Some(unsafe {
            // SAFETY: the buffer was non-empty, so `head` held the first live
            // element. It is no longer counted as live, so it is read once.
            self.slot(head).assume_init_read()
        })
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[inline]
    pub fn peek_first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a mutable reference to the first element, or `None` if empty.
    #[inline]
    pub fn peek_first_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Returns a reference to the last element, or `None` if empty.
    #[inline]
    pub fn peek_last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        Some(unsafe {
            // SAFETY: the buffer is non-empty, so `tail` is live.
            self.slot(self.tail).assume_init_ref()
        })
    }

    /// Returns a mutable reference to the last element, or `None` if empty.
    #[inline]
    pub fn peek_last_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            return None;
        }

        let tail = self.tail;
        Some(unsafe {
            // SAFETY: the buffer is non-empty, so `tail` is live.
            self.slot_mut(tail).assume_init_mut()
        })
    }

    /// Fills `buf` with the leading elements in logical order and returns
    /// how many were copied, `min(buf.len(), len)`. The buffer itself is
    /// left untouched; a wrapped live range is copied in two runs.
    pub fn read(&self, buf: &mut [T]) -> usize
    where
        T: Copy,
    {
        let count = usize::min(buf.len(), self.len);
        let first_run = usize::min(count, self.capacity() - self.head);

        unsafe {
            // SAFETY: the first `count` logical positions are live, split
            // into at most two runs of the storage. `buf` has room for
            // `count` elements and cannot alias our storage.
            ptr::copy_nonoverlapping(self.buf.as_ptr().add(self.head).cast::<T>(), buf.as_mut_ptr(), first_run);
            ptr::copy_nonoverlapping(self.buf.as_ptr().cast::<T>(), buf.as_mut_ptr().add(first_run), count - first_run);
        }

        count
    }

    /// Drops up to `n` elements from the front of the buffer.
    ///
    /// Returns the number of elements actually dropped.
    pub fn drop_first(&mut self, n: usize) -> usize {
        let count = usize::min(self.len, n);
        let cap = self.capacity();

        if !mem::needs_drop::<T>() {
            self.head = wrap_offset(self.head, count, cap);
            self.len -= count;
            return count;
        }

        for _ in 0..count {
            let head = self.head;
            // Unlink before dropping so a panicking destructor cannot
            // cause the same slot to be dropped twice.
            self.head = wrap_inc(head, cap);
            self.len -= 1;
            unsafe {
                // SAFETY: `head` held the first live element.
                self.slot_mut(head).assume_init_drop();
            }
        }

        count
    }

    /// Drops up to `n` elements from the back of the buffer.
    ///
    /// Returns the number of elements actually dropped.
    pub fn drop_last(&mut self, n: usize) -> usize {
        let count = usize::min(self.len, n);
        let cap = self.capacity();

        if !mem::needs_drop::<T>() {
            // `tail` walks back `count` slots, i.e. forward `cap - count`.
            self.tail = wrap_offset(self.tail, cap - count % cap, cap);
            self.len -= count;
            return count;
        }

        for _ in 0..count {
            let tail = self.tail;
            self.tail = wrap_dec(tail, cap);
            self.len -= 1;
            unsafe {
                // SAFETY: `tail` held the last live element.
                self.slot_mut(tail).assume_init_drop();
            }
        }

        count
    }

    /// Drops every element. The capacity is kept.
    pub fn clear(&mut self) {
        self.drop_first(self.len);
    }

    /// Returns a front-to-back iterator over the elements.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        let mut out = Self::new(self.capacity());
        out.extend(self.iter().cloned());
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBuffer<T> {}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::new(iter.size_hint().0);
        out.extend(iter);
        out
    }
}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
