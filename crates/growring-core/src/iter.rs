use core::iter::FusedIterator;

use crate::RingBuffer;

/// Borrowing iterator over a [`RingBuffer`], front to back.
pub struct Iter<'a, T> {
    rb: &'a RingBuffer<T>,
    // Logical positions still to be yielded: `front..back`.
    front: usize,
    back: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(rb: &'a RingBuffer<T>) -> Self {
        Self { rb, front: 0, back: rb.len() }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { rb: self.rb, front: self.front, back: self.back }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let rb: &'a RingBuffer<T> = self.rb;
        let item = rb.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        let rb: &'a RingBuffer<T> = self.rb;
        rb.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Owning iterator over a [`RingBuffer`], front to back.
pub struct IntoIter<T> {
    rb: RingBuffer<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(rb: RingBuffer<T>) -> Self {
        Self { rb }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.rb.shift()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rb.len(), Some(self.rb.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.rb.pop()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::RingBuffer;
    use std::cell::Cell;
    use std::vec;
    use std::vec::Vec;

    fn wrapped() -> RingBuffer<i32> {
        // Storage [5, 6, 3, 4] with head at slot 2.
        let mut rb = RingBuffer::new(4);
        for i in 1..=4 {
            rb.push(i);
        }
        rb.shift();
        rb.shift();
        rb.push(5);
        rb.push(6);
        rb
    }

    #[test]
    fn test_iter_follows_logical_order() {
        let rb = wrapped();
        let items: Vec<i32> = rb.iter().copied().collect();
        assert_eq!(items, vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_iter_reversed() {
        let rb = wrapped();
        let items: Vec<i32> = rb.iter().rev().copied().collect();
        assert_eq!(items, vec![6, 5, 4, 3]);
    }

    #[test]
    fn test_iter_both_ends_meet() {
        let rb = wrapped();
        let mut it = rb.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(&3));
        assert_eq!(it.next_back(), Some(&6));
        assert_eq!(it.len(), 2);
        assert_eq!(it.next(), Some(&4));
        assert_eq!(it.next_back(), Some(&5));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);
    }

    #[test]
    fn test_iter_empty() {
        let rb = RingBuffer::<i32>::new(2);
        assert_eq!(rb.iter().next(), None);
        assert_eq!(rb.iter().len(), 0);
    }

    #[test]
    fn test_ref_into_iter() {
        let rb = wrapped();
        let mut sum = 0;
        for v in &rb {
            sum += v;
        }
        assert_eq!(sum, 18);
    }

    #[test]
    fn test_into_iter_both_ends() {
        let mut it = wrapped().into_iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(3));
        assert_eq!(it.next_back(), Some(6));
        let rest: Vec<i32> = it.collect();
        assert_eq!(rest, vec![4, 5]);
    }

    #[test]
    fn test_into_iter_drops_remaining() {
        struct Tracked<'a>(&'a Cell<u32>);
        impl Drop for Tracked<'_> {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let counter = Cell::new(0u32);
        let mut rb = RingBuffer::new(2);
        for _ in 0..5 {
            rb.push(Tracked(&counter));
        }

        let mut it = rb.into_iter();
        drop(it.next());
        assert_eq!(counter.get(), 1);
        drop(it);
        assert_eq!(counter.get(), 5);
    }
}
