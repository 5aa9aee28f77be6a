#![no_std]

extern crate alloc;

mod iter;
mod ringbuffer;

pub use iter::{IntoIter, Iter};
pub use ringbuffer::RingBuffer;
